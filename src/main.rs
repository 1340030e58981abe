use std::{fs, io::Write, time::Instant};

use log::info;

use sparse_tsp_core::{
    Result, Route, SolverInput, SolverOptions, format_node_id, logging, solve_sparse_tour,
};

fn main() -> Result<()> {
    let now = Instant::now();
    let options = SolverOptions::from_args()?;
    logging::init_logger(&options)?;
    let input = SolverInput::load(&options)?;

    info!("input: n={} arcs={}", input.n(), input.arcs.len());

    let route = solve_sparse_tour(&input, &options)?;

    write_route(&route, &options)?;

    info!(
        "output: n={} time={:.2}s",
        route.len(),
        now.elapsed().as_secs_f32()
    );

    route.route_metrics(&input.points, options.outlier_threshold);

    Ok(())
}

fn write_route(route: &Route, options: &SolverOptions) -> Result<()> {
    match options.output_path() {
        Some(path) => {
            let mut out = String::with_capacity(route.len() * 8);
            for &node in &route.nodes {
                out.push_str(&format_node_id(node));
                out.push('\n');
            }
            fs::write(path, out)?;
        }
        None => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            for &node in &route.nodes {
                writeln!(handle, "{}", format_node_id(node))?;
            }
        }
    }
    Ok(())
}
