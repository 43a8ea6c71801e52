use super::memo::{Lookup, MemoCache};
use super::params::{ViewConfig, ViewParams};
use super::pipeline::project;
use crate::order::Order;
use crate::probe::{NoProbe, Probe};

/// The inputs an order view's output was computed from.
#[derive(Debug, Clone)]
struct ViewInputs {
    source: Vec<Order>,
    params: ViewParams,
}

fn same_inputs(cached: &ViewInputs, source: &[Order], params: &ViewParams, probe: &dyn Probe) -> bool {
    cached.params == *params
        && cached.source.len() == source.len()
        && cached
            .source
            .iter()
            .zip(source)
            .all(|(a, b)| a.eq_with(b, probe))
}

/// A filtered, sorted projection of an order collection, recomputed only when
/// the source collection or the [`ViewParams`] change by value.
///
/// # Call order
///
/// Nothing is computed automatically. Call [`update`](Self::update),
/// [`refresh`](Self::refresh) or [`evaluate`](Self::evaluate) before
/// [`output`](Self::output); reading the output of a view that was never
/// updated panics.
///
/// The view is meant to be driven from one thread; it takes `&mut self` for
/// every update and does no locking of its own.
pub struct OrderView<P = NoProbe> {
    cache: MemoCache<ViewInputs, Vec<Order>>,
    config: ViewConfig,
    probe: P,
}

impl OrderView<NoProbe> {
    /// A view over `source` that has not been evaluated yet.
    pub fn new(source: Vec<Order>, params: ViewParams) -> Self {
        Self::with_config(source, params, ViewConfig::default())
    }

    pub fn with_config(source: Vec<Order>, params: ViewParams, config: ViewConfig) -> Self {
        Self {
            cache: MemoCache::new(ViewInputs { source, params }),
            config,
            probe: NoProbe,
        }
    }
}

impl<P: Probe> OrderView<P> {
    /// Swap in an instrumentation probe. Cached state is kept.
    pub fn with_probe<Q: Probe>(self, probe: Q) -> OrderView<Q> {
        OrderView {
            cache: self.cache,
            config: self.config,
            probe,
        }
    }

    /// Bring the cached output up to date with `source` and `params`.
    ///
    /// The inputs are always compared against the cached ones first; the
    /// filter and sort only run when something differs or nothing is cached
    /// yet. On a hit nothing is allocated.
    pub fn update(&mut self, source: &[Order], params: &ViewParams) -> Lookup {
        let (config, probe) = (&self.config, &self.probe as &dyn Probe);

        let lookup = self.cache.evaluate_with(
            &(source, params),
            |cached, (source, params)| same_inputs(cached, source, params, probe),
            |(source, params)| {
                let output = project(source, params, config, probe);
                let inputs = ViewInputs {
                    source: source.to_vec(),
                    params: (*params).clone(),
                };
                (inputs, output)
            },
        );
        self.record(lookup);
        lookup
    }

    /// Compute from the inputs given at construction (or the last update) if
    /// nothing is cached yet.
    pub fn refresh(&mut self) -> Lookup {
        let (config, probe) = (&self.config, &self.probe as &dyn Probe);
        let lookup = self
            .cache
            .refresh(|inputs| project(&inputs.source, &inputs.params, config, probe));
        self.record(lookup);
        lookup
    }

    /// [`update`](Self::update) followed by [`output`](Self::output).
    pub fn evaluate(&mut self, source: &[Order], params: &ViewParams) -> &[Order] {
        self.update(source, params);
        self.output()
    }

    fn record(&self, lookup: Lookup) {
        match lookup {
            Lookup::Hit => {
                self.probe.cache_hit();
                tracing::trace!("order view cache hit");
            }
            Lookup::Miss => {
                self.probe.recomputed();
                tracing::debug!(
                    source_len = self.cache.key().source.len(),
                    output_len = self.try_output().map_or(0, <[Order]>::len),
                    sort_keys = self.cache.key().params.sort_keys().len(),
                    "order view recomputed"
                );
            }
        }
    }
}

impl<P> OrderView<P> {
    /// The cached projection.
    ///
    /// # Panics
    ///
    /// If the view has never been updated.
    pub fn output(&self) -> &[Order] {
        match self.cache.value() {
            Some(output) => output,
            None => panic!("OrderView::output called before the first update"),
        }
    }

    /// The cached projection, or `None` before the first update.
    pub fn try_output(&self) -> Option<&[Order]> {
        self.cache.value().map(Vec::as_slice)
    }

    pub fn is_primed(&self) -> bool {
        self.cache.is_primed()
    }

    /// The source snapshot the cached output belongs to.
    pub fn source(&self) -> &[Order] {
        &self.cache.key().source
    }

    pub fn params(&self) -> &ViewParams {
        &self.cache.key().params
    }

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    pub fn probe(&self) -> &P {
        &self.probe
    }
}
