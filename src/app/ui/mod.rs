mod chart_window;
mod elements;
mod export;
mod panels;
