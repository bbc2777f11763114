use clap::{ArgGroup, Parser, Subcommand};
use nucleus_core::*;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "nucleus")]
#[command(about = "Workout-aware macro planner", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Use a specific config file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the week's schedule with adjusted daily targets (default)
    Plan,

    /// Show weekly totals only
    Summary {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show one day's workout and targets
    Show {
        /// Day name, e.g. monday or mon
        day: Weekday,
    },

    /// Update fields of one day's workout
    #[command(group(ArgGroup::new("fields").required(true).multiple(true)))]
    Set {
        /// Day name, e.g. monday or mon
        day: Weekday,

        /// Workout type (rest, cardio, strength, hiit, yoga, sports)
        #[arg(long = "type", group = "fields")]
        workout_type: Option<WorkoutType>,

        /// Intensity (low, medium, high)
        #[arg(long, group = "fields")]
        intensity: Option<Intensity>,

        /// Duration in minutes
        #[arg(long, group = "fields")]
        duration: Option<u32>,

        /// Calories burned
        #[arg(long, group = "fields", value_parser = parse_calories)]
        calories_burned: Option<f64>,

        #[arg(long, group = "fields")]
        name: Option<String>,

        #[arg(long, group = "fields")]
        notes: Option<String>,
    },

    /// Restore the default schedule for the current week
    Reset,

    /// Export the weekly plan as CSV
    Export { path: PathBuf },

    /// Replace the schedule with one read from a CSV plan
    Import { path: PathBuf },
}

fn main() -> ExitCode {
    nucleus_core::logging::init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            if matches!(e, Error::CorruptSchedule { .. }) {
                eprintln!("Run `nucleus reset` to replace it with the default schedule.");
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match cli.config {
        Some(ref path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let data_dir = cli.data_dir.unwrap_or_else(|| config.data.data_dir.clone());
    let schedule_path = data_dir.join("schedule.json");

    tracing::debug!("Using schedule file {:?}", schedule_path);

    match cli.command.unwrap_or(Commands::Plan) {
        Commands::Plan => cmd_plan(&schedule_path, &config),
        Commands::Summary { json } => cmd_summary(&schedule_path, &config, json),
        Commands::Show { day } => cmd_show(&schedule_path, &config, day),
        Commands::Set {
            day,
            workout_type,
            intensity,
            duration,
            calories_burned,
            name,
            notes,
        } => {
            let patch = WorkoutPatch {
                date: None,
                workout_type,
                intensity,
                duration,
                calories_burned,
                name,
                notes,
            };
            cmd_set(&schedule_path, &config, day, patch)
        }
        Commands::Reset => cmd_reset(&schedule_path),
        Commands::Export { path } => cmd_export(&schedule_path, &config, &path),
        Commands::Import { path } => cmd_import(&schedule_path, &path),
    }
}

fn cmd_plan(schedule_path: &Path, config: &Config) -> Result<()> {
    let schedule = WorkoutSchedule::load(schedule_path)?;
    let plans = config.adjustments.plan(&config.baseline, schedule.days());

    println!("\n╭─────────────────────────────────────────╮");
    println!("│  WEEKLY MACRO PLAN");
    println!("╰─────────────────────────────────────────╯");
    println!();
    println!(
        "  Baseline: {} cal | {}g protein | {}g carbs | {}g fat",
        amount(config.baseline.calories),
        amount(config.baseline.protein),
        amount(config.baseline.carbs),
        amount(config.baseline.fat)
    );
    println!();

    for plan in &plans {
        display_day(plan);
    }

    display_summary(&config.adjustments.summarize(&config.baseline, schedule.days()));
    Ok(())
}

fn cmd_summary(schedule_path: &Path, config: &Config, json: bool) -> Result<()> {
    let schedule = WorkoutSchedule::load(schedule_path)?;
    let summary = config.adjustments.summarize(&config.baseline, schedule.days());

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        display_summary(&summary);
    }
    Ok(())
}

fn cmd_show(schedule_path: &Path, config: &Config, day: Weekday) -> Result<()> {
    let schedule = WorkoutSchedule::load(schedule_path)?;

    match schedule.get(day) {
        Some(workout) => {
            let plan = DayPlan {
                workout: workout.clone(),
                targets: config.adjustments.adjust(&config.baseline, workout),
                adjustments: config.adjustments.reasons(workout),
            };
            println!();
            display_day(&plan);
            if let Some(ref notes) = workout.notes {
                println!("             Notes: {}", notes);
                println!();
            }
        }
        None => println!("No workout scheduled for {}.", day),
    }
    Ok(())
}

fn cmd_set(schedule_path: &Path, config: &Config, day: Weekday, patch: WorkoutPatch) -> Result<()> {
    let schedule = WorkoutSchedule::update_file(schedule_path, |schedule| {
        schedule.update(day, patch)?;
        Ok(())
    })?;

    println!("\n✓ Updated {}", day);
    if let Some(workout) = schedule.get(day) {
        let plan = DayPlan {
            workout: workout.clone(),
            targets: config.adjustments.adjust(&config.baseline, workout),
            adjustments: config.adjustments.reasons(workout),
        };
        println!();
        display_day(&plan);
    }
    Ok(())
}

fn cmd_reset(schedule_path: &Path) -> Result<()> {
    let schedule = WorkoutSchedule::default();
    schedule.save(schedule_path)?;
    println!("✓ Schedule reset to defaults ({} days)", schedule.len());
    Ok(())
}

fn cmd_export(schedule_path: &Path, config: &Config, path: &Path) -> Result<()> {
    let schedule = WorkoutSchedule::load(schedule_path)?;
    let plans = plan_week(&config.baseline, schedule.days(), &config.adjustments);
    let count = export_plan_csv(path, &plans)?;

    println!("✓ Exported {} days", count);
    println!("  CSV: {}", path.display());
    Ok(())
}

fn cmd_import(schedule_path: &Path, path: &Path) -> Result<()> {
    let schedule = import_schedule_csv(path)?;
    schedule.save(schedule_path)?;
    println!("✓ Imported {} days from {}", schedule.len(), path.display());
    Ok(())
}

fn display_day(plan: &DayPlan) {
    let workout = &plan.workout;

    if workout.is_workout_day() {
        let label = workout
            .name
            .as_deref()
            .map(|n| format!(" \"{}\"", n))
            .unwrap_or_default();
        println!(
            "  {:<10} {}{} · {} min · {} cal burned · {} intensity",
            workout.day,
            workout.workout_type,
            label,
            workout.duration,
            amount(workout.calories_burned),
            workout.intensity
        );
    } else {
        println!("  {:<10} Rest & Recovery Day", workout.day);
    }

    println!(
        "             {} cal | {}g protein | {}g carbs | {}g fat",
        amount(plan.targets.calories),
        amount(plan.targets.protein),
        amount(plan.targets.carbs),
        amount(plan.targets.fat)
    );

    if workout.is_workout_day() && !plan.adjustments.is_empty() {
        println!(
            "             ↑ Adjusted for {} workout",
            workout.workout_type.as_str().to_lowercase()
        );
    }
    println!();
}

fn display_summary(summary: &WeeklySummary) {
    println!("─────────────────────────────────────────");
    println!(
        "  Avg daily calories: {} (weekly: {})",
        amount(summary.avg_daily_calories),
        amount(summary.weekly_calories)
    );
    println!(
        "  Workout days:       {} / {}",
        summary.workout_day_count, summary.day_count
    );
    println!(
        "  Calories burned:    {}",
        amount(summary.total_calories_burned)
    );
}

/// Whole numbers without a decimal point, anything else to one place
fn amount(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.1}", value)
    }
}

fn parse_calories(s: &str) -> std::result::Result<f64, String> {
    let value: f64 = s.parse().map_err(|e| format!("{}", e))?;
    if !value.is_finite() || value < 0.0 {
        return Err(format!("must be a non-negative number, got {}", s));
    }
    Ok(value)
}
