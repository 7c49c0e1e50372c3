#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChartKind {
    Histogram,
    Scatter,
}

impl ChartKind {
    pub fn token(self) -> &'static str {
        match self {
            Self::Histogram => "histogram",
            Self::Scatter => "scatter",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Histogram => "Histogram",
            Self::Scatter => "Scatter plot",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MetricKind {
    CallbackDuration,
    MessageLatency,
    ActivationDelay,
    MessageDelay,
    PublicationDelay,
}

impl MetricKind {
    pub const ALL: [MetricKind; 5] = [
        Self::CallbackDuration,
        Self::MessageLatency,
        Self::ActivationDelay,
        Self::MessageDelay,
        Self::PublicationDelay,
    ];

    pub fn token(self) -> &'static str {
        match self {
            Self::CallbackDuration => "callback-duration",
            Self::MessageLatency => "messages-latency",
            Self::ActivationDelay => "activations-delay",
            Self::MessageDelay => "messages-delay",
            Self::PublicationDelay => "publications-delay",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::CallbackDuration => "Execution duration",
            Self::MessageLatency => "Message latency",
            Self::ActivationDelay => "Activation delay",
            Self::MessageDelay => "Message delay",
            Self::PublicationDelay => "Publication delay",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Node,
    Edge,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeSubKind {
    Callback,
    Timer,
    Service,
    Publisher,
    Subscriber,
}

impl NodeSubKind {
    pub const DETECTION_ORDER: [NodeSubKind; 5] = [
        Self::Subscriber,
        Self::Callback,
        Self::Timer,
        Self::Service,
        Self::Publisher,
    ];

    pub fn marker(self) -> &'static str {
        match self {
            Self::Callback => "interface_type=Callback",
            Self::Timer => "interface_type=Timer",
            Self::Service => "interface_type=Service",
            Self::Publisher => "interface_type=Publisher",
            Self::Subscriber => "interface_type=Subscriber",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Callback => "callback",
            Self::Timer => "timer",
            Self::Service => "service",
            Self::Publisher => "publisher",
            Self::Subscriber => "subscriber",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ElementRef {
    pub identifier: String,
    pub element_kind: ElementKind,
    pub node_sub_kind: Option<NodeSubKind>,
}

impl ElementRef {
    /// Metric charted when the element is first opened or hovered.
    ///
    /// Service nodes, and nodes carrying no interface marker, have no default;
    /// the caller has to ask for an explicit metric instead.
    pub fn default_metric(&self) -> Option<MetricKind> {
        match (self.element_kind, self.node_sub_kind) {
            (ElementKind::Edge, _) => Some(MetricKind::MessageLatency),
            (ElementKind::Node, Some(NodeSubKind::Callback)) => Some(MetricKind::CallbackDuration),
            (ElementKind::Node, Some(NodeSubKind::Timer)) => Some(MetricKind::ActivationDelay),
            (ElementKind::Node, Some(NodeSubKind::Publisher)) => Some(MetricKind::PublicationDelay),
            (ElementKind::Node, Some(NodeSubKind::Subscriber)) => Some(MetricKind::MessageDelay),
            (ElementKind::Node, Some(NodeSubKind::Service)) | (ElementKind::Node, None) => None,
        }
    }

    pub fn selectable_metrics(&self) -> &'static [MetricKind] {
        match (self.element_kind, self.node_sub_kind) {
            (ElementKind::Node, Some(NodeSubKind::Callback)) => {
                &[MetricKind::CallbackDuration, MetricKind::ActivationDelay]
            }
            (ElementKind::Node, Some(NodeSubKind::Service)) | (ElementKind::Node, None) => {
                &MetricKind::ALL
            }
            _ => &[],
        }
    }

    pub fn kind_label(&self) -> &'static str {
        match (self.element_kind, self.node_sub_kind) {
            (ElementKind::Edge, _) => "edge",
            (ElementKind::Node, Some(sub_kind)) => sub_kind.label(),
            (ElementKind::Node, None) => "node",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    #[default]
    Svg,
    Png,
}

impl OutputFormat {
    pub fn token(self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Png => "png",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ChartRequest {
    pub element_id: String,
    pub metric: MetricKind,
    pub chart_kind: ChartKind,
    pub bin_count: Option<u32>,
    pub render_size: u32,
    pub output_format: OutputFormat,
}

impl ChartRequest {
    pub const DEFAULT_RENDER_SIZE: u32 = 800;
    pub const TOOLTIP_RENDER_SIZE: u32 = 400;

    pub fn new(element_id: impl Into<String>, metric: MetricKind, chart_kind: ChartKind) -> Self {
        Self {
            element_id: element_id.into(),
            metric,
            chart_kind,
            bin_count: None,
            render_size: Self::DEFAULT_RENDER_SIZE,
            output_format: OutputFormat::default(),
        }
    }

    pub fn with_bins(mut self, bin_count: Option<u32>) -> Self {
        self.bin_count = bin_count;
        self
    }

    pub fn with_size(mut self, render_size: u32) -> Self {
        self.render_size = render_size;
        self
    }

    pub fn with_output_format(mut self, output_format: OutputFormat) -> Self {
        self.output_format = output_format;
        self
    }

    pub fn effective_bins(&self) -> Option<u32> {
        match self.chart_kind {
            ChartKind::Histogram => self.bin_count,
            ChartKind::Scatter => None,
        }
    }
}
