use typed_builder::TypedBuilder;

/// Knobs for one aggregation run. Defaults match the dashboard's rendering
/// surface; the node size factor in particular is a presentational scaling
/// constant, kept configurable rather than hard-coded.
#[derive(Debug, Clone, TypedBuilder)]
pub struct AggregateOptions {
    /// Node display size is `count * size_factor`.
    #[builder(default = 3)]
    pub size_factor: u64,
    /// Node weight is mean sentiment times this scale.
    #[builder(default = 100.0)]
    pub weight_scale: f64,
    /// Row cap for the location and tag tables.
    #[builder(default = 5)]
    pub top_n: usize,
    /// Number of fixed-width sentiment histogram bins over [-1, 1].
    #[builder(default = 10)]
    pub histogram_bins: usize,
    /// Row cap for the word-frequency table.
    #[builder(default = 50)]
    pub max_words: usize,
}

impl Default for AggregateOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_dashboard_surface() {
        let opts = AggregateOptions::default();
        assert_eq!(opts.size_factor, 3);
        assert_eq!(opts.weight_scale, 100.0);
        assert_eq!(opts.top_n, 5);
    }

    #[test]
    fn builder_overrides_single_knob() {
        let opts = AggregateOptions::builder().top_n(10).build();
        assert_eq!(opts.top_n, 10);
        assert_eq!(opts.size_factor, 3);
    }
}
