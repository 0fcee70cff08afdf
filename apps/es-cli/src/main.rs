mod report;

use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::{Args, Parser, Subcommand};
use es_app::{
    AppResult, RunConfig, RunOverrides, SweepProgressEvent, SweepRequest, SweepStage, list_models,
    load_overrides, run_sweep_with_progress,
};
use es_models::ModelRegistry;
use tracing::Level;

#[derive(Parser)]
#[command(name = "eigsweep")]
#[command(
    about = "Compute the lowest eigenpairs of a parameterised model over a parameter sweep",
    long_about = None
)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    run: RunArgs,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a sweep (the default when no subcommand is given)
    Run(RunArgs),
    /// List the available models and their keywords
    Models,
}

#[derive(Args)]
struct RunArgs {
    /// Model descriptor 'namespace.Class:kw1=v1,kw2=v2'
    /// [default: gaussian.Gaussian1d:N=128,V0=-4.0,R=2.0]
    #[arg(short, long)]
    model: Option<String>,

    /// Parameter spec 'x', 'x1,x2,...', 'min,max:len' or 'min,max:len,exp'
    /// [default: 5.0,20.0:20]
    #[arg(short = 'L', long)]
    parameters: Option<String>,

    /// Number of eigenpairs per parameter value [default: 1]
    #[arg(short, long)]
    knum: Option<usize>,

    /// Output file; '.eig' or '.bin' selects the binary container,
    /// anything else tab-separated text
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Also compute and store eigenvectors
    #[arg(long)]
    vectors: bool,

    /// YAML run file with the same fields; flags override it
    #[arg(long)]
    config: Option<PathBuf>,
}

impl RunArgs {
    fn overrides(&self) -> RunOverrides {
        RunOverrides {
            model: self.model.clone(),
            parameters: self.parameters.clone(),
            knum: self.knum,
            output: self.output.clone(),
            vectors: self.vectors.then_some(true),
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Some(Commands::Models) => cmd_models(),
        Some(Commands::Run(args)) => cmd_run(&args),
        None => cmd_run(&cli.run),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(err.exit_code())
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
}

fn cmd_models() -> AppResult<()> {
    for model in list_models(&ModelRegistry::builtin()) {
        println!("{} - {}", model.type_path, model.summary);
        for keyword in &model.keywords {
            println!("    {keyword}");
        }
    }
    Ok(())
}

fn cmd_run(args: &RunArgs) -> AppResult<()> {
    let started = Instant::now();

    let mut config = RunConfig::default();
    if let Some(path) = &args.config {
        config = config.merged(&load_overrides(path)?);
    }
    let config = config.merged(&args.overrides());

    let command = std::env::args().collect::<Vec<_>>().join(" ");
    let registry = ModelRegistry::builtin();
    let request = SweepRequest {
        config: &config,
        registry: &registry,
        command: &command,
    };

    println!(
        "{}",
        report::header(&config.model, &config.parameters, config.knum)
    );
    println!("Computing eigenvalues...");

    let show_progress = io::stderr().is_terminal();
    let mut last_emit = Instant::now();
    let mut last_stage = None;
    let outcome = run_sweep_with_progress(
        &request,
        Some(&mut |event| {
            if !show_progress {
                return;
            }
            let emit_now =
                last_stage != Some(event.stage) || last_emit.elapsed().as_millis() >= 100;
            if emit_now {
                render_cli_progress(&event);
                last_stage = Some(event.stage);
                last_emit = Instant::now();
            }
        }),
    );
    if show_progress {
        clear_progress_line();
    }
    let response = outcome?;

    print!("{}", report::spectra(&response, config.vectors));

    if let Some(write) = &response.write {
        if write.vectors_omitted {
            println!(
                "Warning: --vectors was given but {} output cannot store eigenvectors. \
                 Use a '.eig' or '.bin' file for full eigenvector output.",
                write.format
            );
        }
        println!("Results written to {} ({})", write.path.display(), write.format);
    }

    println!("{}", report::footer(started.elapsed().as_secs_f64()));
    Ok(())
}

fn clear_progress_line() {
    eprint!("\r{}\r", " ".repeat(100));
    let _ = io::stderr().flush();
}

fn render_cli_progress(event: &SweepProgressEvent) {
    let line = match (event.stage, event.fraction_complete(), &event.solve) {
        (SweepStage::Solving, Some(fraction), Some(solve)) => {
            let width = 28usize;
            let filled = ((fraction * width as f64).round() as usize).min(width);
            format!(
                "\r[{}{}] {:>6.2}%  L={:.3}  {}/{}  elapsed={:.1}s",
                "#".repeat(filled),
                "-".repeat(width.saturating_sub(filled)),
                fraction * 100.0,
                solve.parameter,
                solve.index + 1,
                solve.total,
                event.elapsed_wall_s
            )
        }
        _ => {
            let spinner = ['|', '/', '-', '\\'];
            let spin_idx = ((event.elapsed_wall_s * 10.0) as usize) % spinner.len();
            let mut line = format!(
                "\r{} {}  elapsed={:.2}s",
                spinner[spin_idx],
                event.stage.label(),
                event.elapsed_wall_s
            );
            if let Some(msg) = &event.message {
                line.push_str(&format!("  {msg}"));
            }
            line
        }
    };
    eprint!("{line}");
    let _ = io::stderr().flush();
}
