//! Shared utilities for the integration tests of the planner.
#![allow(dead_code, reason = "not every test file uses every helper")]

use std::fs::File;
use std::path::PathBuf;
use std::process::Child;
use std::process::Command;
use std::process::ExitStatus;
use std::process::Stdio;
use std::time::Duration;

use plan_storage::basic_types::Category;
use plan_storage::basic_types::Item;
use plan_storage::basic_types::ItemId;
use plan_storage::basic_types::ItemTable;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::Rng;
use rand::SeedableRng;
use wait_timeout::ChildExt;

pub(crate) fn item(id: u64, begin: u32, end: u32, width: u32, category: Category) -> Item {
    Item {
        id: ItemId(id),
        begin,
        end,
        width,
        category,
    }
}

pub(crate) fn table(items: &[(u64, u32, u32, u32, Category)]) -> ItemTable {
    ItemTable::new(
        items
            .iter()
            .map(|&(id, begin, end, width, category)| item(id, begin, end, width, category))
            .collect(),
    )
    .unwrap()
}

/// The knobs of [`generate_schedule`].
#[derive(Clone, Copy, Debug)]
pub(crate) struct ScheduleParameters {
    pub(crate) days: usize,
    /// The total width stored on any day never exceeds this.
    pub(crate) concurrent: u32,
    pub(crate) min_length: usize,
    pub(crate) max_length: usize,
    pub(crate) max_width: u32,
    /// The fraction of generated items which is dropped again.
    pub(crate) prune: f64,
    pub(crate) categories: i64,
}

impl Default for ScheduleParameters {
    fn default() -> Self {
        ScheduleParameters {
            days: 12,
            concurrent: 5,
            min_length: 2,
            max_length: 6,
            max_width: 3,
            prune: 0.05,
            categories: 2,
        }
    }
}

/// Generate random items such that the total width stored on each day stays within
/// `parameters.concurrent`. Days are filled in random order; each new item is grown around a day
/// which still has room, as far as the neighbouring days allow.
pub(crate) fn generate_schedule(parameters: ScheduleParameters, seed: u64) -> Vec<Item> {
    let ScheduleParameters {
        days,
        concurrent: cap,
        min_length,
        max_length,
        max_width,
        prune,
        categories,
    } = parameters;

    let mut rng = SmallRng::seed_from_u64(seed);
    let mut concurrent = vec![0; days];
    let mut candidates = (0..days).collect::<Vec<_>>();
    candidates.shuffle(&mut rng);

    let mut tasks = vec![];

    while let Some(&selected) = candidates.last() {
        if concurrent[selected] >= cap {
            let _ = candidates.pop();
            continue;
        }

        let mut low = selected;
        let limit_low = selected.saturating_sub(max_length);
        while low > limit_low && concurrent[low - 1] < cap {
            low -= 1;
        }

        let mut high = selected;
        let limit_high = (days - 1).min(selected + max_length);
        while high < limit_high && concurrent[high + 1] < cap {
            high += 1;
        }

        if high - low + 1 < min_length {
            concurrent[low..=high].fill(cap);
            continue;
        }

        let begin = rng.gen_range(low..high + 2 - min_length);
        let duration = rng.gen_range(min_length..(high + 2 - begin).min(max_length + 1));
        let end = begin + duration - 1;

        let room = concurrent[begin..=end]
            .iter()
            .map(|&used| cap - used)
            .min()
            .unwrap_or(0);
        let width = rng.gen_range(1..=room.min(max_width));

        for used in &mut concurrent[begin..=end] {
            *used += width;
        }

        tasks.push((begin as u32, end as u32, width, rng.gen_range(0..categories)));
    }

    tasks.shuffle(&mut rng);
    let num_pruned = (tasks.len() as f64 * prune).round() as usize;
    let mut tasks = tasks.split_off(num_pruned);
    tasks.sort();

    tasks
        .into_iter()
        .enumerate()
        .map(|(id, (begin, end, width, category))| item(id as u64, begin, end, width, category))
        .collect()
}

/// Render items in the input table format.
pub(crate) fn to_csv(items: &[Item]) -> String {
    let mut csv = String::from("item_id,begin,end,width,type\n");
    for item in items {
        csv.push_str(&format!(
            "{},{},{},{},{}\n",
            item.id, item.begin, item.end, item.width, item.category
        ));
    }
    csv
}

#[derive(Debug)]
pub(crate) struct Run {
    pub(crate) status: ExitStatus,
    pub(crate) log: String,
    /// The written output table, if the planner produced one.
    pub(crate) output: Option<String>,
}

/// A planner process which was started by [`spawn_planner`].
pub(crate) struct Planner {
    pub(crate) child: Child,
    pub(crate) log_path: PathBuf,
    output_path: PathBuf,
}

impl Planner {
    /// The log written so far.
    pub(crate) fn log(&self) -> String {
        std::fs::read_to_string(&self.log_path).unwrap_or_default()
    }

    pub(crate) fn wait(mut self) -> Run {
        let status = match self.child.wait_timeout(TEST_TIMEOUT) {
            Ok(Some(status)) => status,
            Ok(None) => {
                let _ = self.child.kill();
                panic!("planner took more than {} seconds", TEST_TIMEOUT.as_secs())
            }
            Err(e) => panic!("error waiting for the planner: {e}"),
        };

        Run {
            status,
            log: std::fs::read_to_string(&self.log_path).expect("Failed to read the log file."),
            output: std::fs::read_to_string(&self.output_path).ok(),
        }
    }
}

pub(crate) const TEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Start the planner binary on `input`, written to a file named after `name` in the test
/// directory of the target. The log goes to a file next to it.
pub(crate) fn spawn_planner<'a>(
    name: &str,
    input: &str,
    args: impl IntoIterator<Item = &'a str>,
) -> Planner {
    let directory = PathBuf::from(env!("CARGO_TARGET_TMPDIR"));
    let input_path = directory.join(format!("{name}.csv"));
    let output_path = directory.join(format!("{name}.out.csv"));
    let log_path = directory.join(format!("{name}.log"));

    std::fs::write(&input_path, input).expect("Failed to write the input table.");
    if output_path.exists() {
        std::fs::remove_file(&output_path).expect("Failed to remove a stale output table.");
    }

    let mut command = Command::new(env!("CARGO_BIN_EXE_plan-storage"));
    for arg in args {
        let _ = command.arg(arg);
    }

    let child = command
        .arg(&input_path)
        .arg(&output_path)
        .stdout(File::create(&log_path).expect("Failed to create the log file."))
        .stderr(Stdio::null())
        .stdin(Stdio::null())
        .spawn()
        .expect("Failed to run the planner.");

    Planner {
        child,
        log_path,
        output_path,
    }
}

/// Run the planner binary on `input` to completion.
pub(crate) fn run_planner<'a>(
    name: &str,
    input: &str,
    args: impl IntoIterator<Item = &'a str>,
) -> Run {
    spawn_planner(name, input, args).wait()
}
