mod os_signal_termination;
mod result;

use std::fs::File;
use std::io::BufWriter;
use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use log::error;
use log::info;
use log::warn;
use log::LevelFilter;
use os_signal_termination::OsSignal;
use plan_storage::checker::verify_placement;
use plan_storage::engine::termination::Combinator;
use plan_storage::engine::termination::TimeBudget;
use plan_storage::engine::EngineOptions;
use plan_storage::optimisation::OptimisationResult;
use plan_storage::optimisation::StoragePlanner;
use plan_storage::parsers::read_item_table;
use plan_storage::parsers::write_placement;
use plan_storage::PlanError;
use result::PlanStorageError;
use result::PlanStorageResult;

#[derive(Debug, Parser)]
#[command(author, version, about, arg_required_else_help = true)]
struct Args {
    /// The item table to plan, with columns 'item_id', 'begin', 'end', 'width' and 'category'
    /// (or 'type').
    input: PathBuf,

    /// Where the item table with the solved 'position' column is written.
    output: PathBuf,

    /// The number of storage slots available on every day.
    #[arg(long = "max-storage", visible_alias = "capacity", default_value_t = 40)]
    max_storage: u32,

    /// Log the search in more detail and let the SAT solver report its progress.
    #[arg(short, long)]
    verbose: bool,

    /// Stop improving after this many milliseconds and keep the best placement found.
    ///
    /// Sending SIGINT or SIGTERM has the same effect at any time.
    #[arg(long = "time-limit")]
    time_limit_ms: Option<u64>,
}

fn configure_logging(verbose: bool) {
    let level_filter = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let start = Instant::now();
    env_logger::Builder::new()
        .format(move |buf, record| {
            writeln!(
                buf,
                "{:5.2} {}",
                start.elapsed().as_secs_f64(),
                record.args()
            )
        })
        .filter_level(level_filter)
        .target(env_logger::Target::Stdout)
        .init();
}

fn main() {
    match run() {
        Ok(()) => {}
        Err(e) => {
            error!("Execution failed, error: {e}");
            std::process::exit(1);
        }
    }
}

fn run() -> PlanStorageResult<()> {
    let args = Args::parse();

    configure_logging(args.verbose);

    if plan_storage::asserts::PLANNER_ASSERT_LEVEL_DEFINITION
        >= plan_storage::asserts::PLANNER_ASSERT_MODERATE
    {
        warn!(
            "Potential performance degradation: the assert level is set to {}, every placement is verified during the search.",
            plan_storage::asserts::PLANNER_ASSERT_LEVEL_DEFINITION
        );
    }

    let items = read_item_table(File::open(&args.input)?)?;
    let capacity = args.max_storage;

    let mut planner = StoragePlanner::with_cadical(
        items,
        capacity,
        EngineOptions {
            verbose: args.verbose,
        },
    )?;

    info!(
        "{} variables, {} clauses",
        planner.model().num_variables(),
        planner.model().num_clauses()
    );

    let termination = Combinator::new(
        OsSignal::install()?,
        args.time_limit_ms.map(TimeBudget::from_millis),
    );

    info!("solving...");
    let placement = match planner.solve(termination, |_| {})? {
        OptimisationResult::Optimal { solution } => solution,
        OptimisationResult::Satisfiable { best_solution } => best_solution,
        OptimisationResult::Infeasible => return Err(PlanError::InfeasibleProblem.into()),
        OptimisationResult::Unknown => return Err(PlanStorageError::NoSolution),
    };

    verify_placement(planner.items(), capacity, &placement)?;

    let mut output = BufWriter::new(File::create(&args.output)?);
    write_placement(&mut output, planner.items(), &placement)?;

    info!(
        "Wrote placement with used width {} to {}",
        placement.used_width(),
        args.output.display()
    );

    Ok(())
}
