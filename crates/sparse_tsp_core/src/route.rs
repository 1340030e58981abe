use crate::node::Point;

/// A concrete closed walk over real sparse arcs, node 0 first and last.
#[derive(Debug, Default)]
pub struct Route {
    pub nodes: Vec<usize>,
}

impl Route {
    pub fn new(nodes: Vec<usize>) -> Self {
        Self { nodes }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Edge-length metrics over the expanded walk. An edge counts as an
    /// outlier when longer than `threshold_factor` times the average.
    pub fn route_metrics(&self, points: &[Point], threshold_factor: f64) -> RouteMetrics {
        let n = self.nodes.len();

        if n < 2 {
            log::info!("metrics: n < 2 so there's nothing to report");
            return RouteMetrics::default();
        }

        let distances: Vec<f64> = self
            .nodes
            .windows(2)
            .map(|pair| points[pair[0]].dist(&points[pair[1]]))
            .collect();
        let total: f64 = distances.iter().sum();
        let average = total / (distances.len() as f64);
        let threshold = average * threshold_factor;
        let outliers = distances.iter().filter(|d| **d > threshold).count();
        let longest = distances.iter().copied().fold(0.0_f64, f64::max);

        log::info!(
            "metrics: n={n} total={total:.4} longest={longest:.4} avg={average:.4} outlier_threshold={threshold:.4} outliers={outliers}",
        );

        RouteMetrics {
            longest,
            outliers,
            total,
            average,
            threshold,
        }
    }
}

#[derive(Debug, Default)]
pub struct RouteMetrics {
    pub longest: f64,
    pub outliers: usize,
    pub total: f64,
    pub average: f64,
    pub threshold: f64,
}
