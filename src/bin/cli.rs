use chrono::{Duration, NaiveDate};
use polars::prelude::{AnyValue, DataFrame};
use std::process::ExitCode;
use study_planner::{
    save_plan_to_csv, save_plan_to_json, DateLocale, PlannerConfig, StudyPlanner,
    SynthesisMetadata,
};

fn render_df_as_text_table(df: &DataFrame) -> String {
    let columns = df.get_columns();
    let col_names: Vec<String> = columns.iter().map(|c| c.name().to_string()).collect();

    let render_value = |av: &AnyValue| -> String {
        match av {
            AnyValue::Null => String::new(),
            AnyValue::Int32(v) => v.to_string(),
            AnyValue::Int64(v) => v.to_string(),
            AnyValue::Float64(v) => format!("{v:.1}"),
            AnyValue::String(s) => s.to_string(),
            AnyValue::Date(days) => {
                let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
                (epoch + Duration::days(*days as i64)).to_string()
            }
            other => other.to_string(),
        }
    };

    // Compute column widths
    let mut widths: Vec<usize> = col_names.iter().map(|n| n.len()).collect();
    for (ci, col) in columns.iter().enumerate() {
        for row_idx in 0..df.height() {
            if let Ok(ref av) = col.get(row_idx) {
                let s = render_value(av);
                if s.len() > widths[ci] {
                    widths[ci] = s.len();
                }
            }
        }
    }

    let mut sep = String::new();
    sep.push('+');
    for w in &widths {
        sep.push_str(&"-".repeat(*w + 2));
        sep.push('+');
    }

    let mut out = String::new();
    out.push_str(&sep);
    out.push('\n');

    out.push('|');
    for (i, name) in col_names.iter().enumerate() {
        out.push(' ');
        out.push_str(name);
        let pad = widths[i] - name.len();
        if pad > 0 {
            out.push_str(&" ".repeat(pad));
        }
        out.push(' ');
        out.push('|');
    }
    out.push('\n');
    out.push_str(&sep);
    out.push('\n');

    for row_idx in 0..df.height() {
        out.push('|');
        for (ci, col) in columns.iter().enumerate() {
            let s = col
                .get(row_idx)
                .map(|av| render_value(&av))
                .unwrap_or_default();
            out.push(' ');
            out.push_str(&s);
            let pad = widths[ci].saturating_sub(s.len());
            if pad > 0 {
                out.push_str(&" ".repeat(pad));
            }
            out.push(' ');
            out.push('|');
        }
        out.push('\n');
    }

    out.push_str(&sep);
    out.push('\n');
    out
}

fn print_usage() {
    eprintln!(
        "Usage: cli <course-text-file> [options]\n\nOptions:\n  --json                 Print the entry collection as JSON instead of a table\n  --save-json <path>     Write the plan snapshot to a JSON file\n  --save-csv <path>      Write the plan snapshot to a CSV file\n  --user <id>            User id recorded in the plan metadata\n  --course <code>        Course code applied to entries without one\n  --month-first          Read ambiguous numeric dates as MM/DD/YYYY"
    );
}

fn main() -> ExitCode {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let Some(input_path) = args.next() else {
        print_usage();
        return ExitCode::FAILURE;
    };

    let mut as_json = false;
    let mut save_json: Option<String> = None;
    let mut save_csv: Option<String> = None;
    let mut user_id = "local".to_string();
    let mut course: Option<String> = None;
    let mut locale = DateLocale::DayFirst;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--json" => as_json = true,
            "--save-json" => save_json = args.next(),
            "--save-csv" => save_csv = args.next(),
            "--user" => {
                if let Some(value) = args.next() {
                    user_id = value;
                }
            }
            "--course" => course = args.next(),
            "--month-first" => locale = DateLocale::MonthFirst,
            other => {
                eprintln!("Unknown option: {other}");
                print_usage();
                return ExitCode::FAILURE;
            }
        }
    }

    let text = match std::fs::read_to_string(&input_path) {
        Ok(text) => text,
        Err(err) => {
            eprintln!("Could not read {input_path}: {err}");
            return ExitCode::FAILURE;
        }
    };

    let mut config = PlannerConfig::default();
    config.locale = locale;
    let planner = StudyPlanner::new(config);

    let mut metadata = SynthesisMetadata::for_user(user_id);
    metadata.course_code = course;

    let plan = planner.plan_from_text(&text, &metadata);
    if plan.is_empty() {
        println!("No schedulable assignments found.");
        return ExitCode::SUCCESS;
    }

    println!("Synthesized ({})", plan.summary().to_cli_summary());
    if as_json {
        match serde_json::to_string_pretty(plan.entries()) {
            Ok(json) => println!("{json}"),
            Err(err) => {
                eprintln!("JSON error: {err}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        match plan.dataframe() {
            Ok(df) => println!("{}", render_df_as_text_table(&df)),
            Err(err) => {
                eprintln!("DataFrame error: {err}");
                return ExitCode::FAILURE;
            }
        }
    }

    if let Some(path) = save_json {
        if let Err(err) = save_plan_to_json(&plan, &path) {
            eprintln!("Could not save {path}: {err}");
            return ExitCode::FAILURE;
        }
        println!("Saved JSON snapshot to {path}");
    }
    if let Some(path) = save_csv {
        if let Err(err) = save_plan_to_csv(&plan, &path) {
            eprintln!("Could not save {path}: {err}");
            return ExitCode::FAILURE;
        }
        println!("Saved CSV snapshot to {path}");
    }

    ExitCode::SUCCESS
}
