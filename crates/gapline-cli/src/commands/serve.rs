//! Serve command - JSON API over the dashboard data.

use colored::Colorize;
use gapline::{Pipeline, PipelineCache};

use crate::cli::DataArgs;
use crate::server::{app, state::AppState};

pub fn run(data: &DataArgs, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let config = data.resolve()?;

    let mut cache = PipelineCache::new(Pipeline::with_config(config.pipeline), config.data);
    // Fail before binding if the inputs are unusable
    let output = cache.get()?;

    let url = format!("http://localhost:{}", port);
    println!();
    println!(
        "{} {}",
        "Starting dashboard API at".cyan().bold(),
        url.white().bold()
    );
    println!();
    println!("  GDP:        {}", cache.paths().gdp_per_cap.display());
    println!("  Life:       {}", cache.paths().life_exp.display());
    println!("  Population: {}", cache.paths().population.display());
    println!(
        "  Rows:       {} ({} countries)",
        output.summary.rows, output.summary.countries
    );
    println!();
    println!("Press {} to stop the server", "Ctrl+C".yellow().bold());
    println!();

    let state = AppState::new(cache);

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        tokio::spawn(async move {
            tokio::signal::ctrl_c().await.ok();
            println!();
            println!("{}", "Shutting down...".yellow());
            std::process::exit(0);
        });

        app::run_server(state, port).await
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::net::TcpListener;
    use tempfile::TempDir;

    #[test]
    fn test_port_in_use_is_an_error() {
        let dir = TempDir::new().unwrap();
        for name in ["gdp_pcap.csv", "life_expectancy.csv", "population.csv"] {
            fs::write(dir.path().join(name), "country,2000\nA,1\n").unwrap();
        }
        let data = DataArgs {
            data_dir: Some(dir.path().to_path_buf()),
            ..Default::default()
        };

        let taken = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = taken.local_addr().unwrap().port();
        assert!(run(&data, port).is_err());
    }
}
