mod render;

use std::io::{self, BufRead, Write};

use anyhow::{anyhow, Result};
use chrono::{DateTime, Local, NaiveDate, TimeZone};
use clap::Parser;
use taskcoin_core::{DayTaskStore, StoreEvent, Task};

#[derive(Parser)]
#[command(name = "taskcoin")]
#[command(about = "Gamified daily task tracker", long_about = None)]
struct Cli {
    /// Log specification, e.g. "debug" or "taskcoin_core=debug"
    #[arg(long, default_value = "warn")]
    log: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _logger = flexi_logger::Logger::try_with_env_or_str(&cli.log)?.start()?;
    log::info!("session started, in-memory store");

    let mut store = DayTaskStore::new();
    store.subscribe(|event| {
        if let StoreEvent::TodayChanged {
            tasks, total_coins, ..
        } = event
        {
            let done = tasks.iter().filter(|t| t.is_completed).count();
            println!("  {done}/{} done today, {total_coins} coins total", tasks.len());
        }
    });

    println!("taskcoin — state lives for this session only. Type `help`.");

    let stdin = io::stdin();
    let mut input = String::new();
    loop {
        print!("> ");
        io::stdout().flush()?;
        input.clear();
        if stdin.lock().read_line(&mut input)? == 0 {
            break;
        }
        let line = input.trim();
        if line.is_empty() {
            continue;
        }
        let (cmd, rest) = line
            .split_once(' ')
            .map(|(c, r)| (c, r.trim()))
            .unwrap_or((line, ""));
        log::debug!("command: {cmd}");

        let outcome = match cmd {
            "add" => store.add_task(rest).map(|_| ()),
            "edit" => edit(&mut store, rest),
            "done" | "toggle" => nth_task(&store, rest).map(|t| store.toggle_task_completion(t.id)),
            "rm" | "delete" => nth_task(&store, rest).map(|t| store.delete_task(t.id)),
            "list" => {
                let tasks = store.today_tasks();
                if tasks.is_empty() {
                    println!("nothing for today yet");
                } else {
                    println!("{}", render::task_list(&tasks));
                }
                Ok(())
            }
            "coins" => {
                println!("{} coins", store.total_coins());
                Ok(())
            }
            "report" => report(&mut store, rest),
            "help" => {
                print_help();
                Ok(())
            }
            "quit" | "exit" => break,
            other => Err(anyhow!("unknown command `{other}` (try `help`)")),
        };
        if let Err(err) = outcome {
            println!("error: {err}");
        }
    }
    Ok(())
}

fn edit(store: &mut DayTaskStore, rest: &str) -> Result<()> {
    let (index, name) = rest
        .split_once(' ')
        .ok_or_else(|| anyhow!("usage: edit <n> <new name>"))?;
    let task = nth_task(store, index)?;
    store.edit_task(task.id, name.trim())
}

fn report(store: &mut DayTaskStore, rest: &str) -> Result<()> {
    let reference = if rest.is_empty() {
        Local::now()
    } else {
        parse_month(rest)?
    };
    store.select_report_month(reference);
    let days = store.report_data();
    if days.is_empty() {
        println!("no data for that month");
    } else {
        println!("{}", render::report_table(&days));
    }
    Ok(())
}

/// Resolve a 1-based position in today's list.
fn nth_task(store: &DayTaskStore, arg: &str) -> Result<Task> {
    let n: usize = arg
        .parse()
        .map_err(|_| anyhow!("expected a task number, got `{arg}`"))?;
    let tasks = store.today_tasks();
    n.checked_sub(1)
        .and_then(|i| tasks.get(i).cloned())
        .ok_or_else(|| anyhow!("no task #{n} today ({} listed)", tasks.len()))
}

fn parse_month(arg: &str) -> Result<DateTime<Local>> {
    let first = NaiveDate::parse_from_str(&format!("{arg}-01"), "%Y-%m-%d")
        .map_err(|_| anyhow!("expected YYYY-MM, got `{arg}`"))?;
    let noon = first.and_hms_opt(12, 0, 0).unwrap();
    Local
        .from_local_datetime(&noon)
        .single()
        .ok_or_else(|| anyhow!("ambiguous local time for `{arg}`"))
}

fn print_help() {
    println!("commands:");
    println!("  add <name>        add a task for today");
    println!("  edit <n> <name>   rename task number n");
    println!("  done <n>          toggle completion of task number n");
    println!("  rm <n>            delete task number n");
    println!("  list              show today's tasks");
    println!("  coins             show the lifetime coin total");
    println!("  report [YYYY-MM]  monthly report (defaults to this month)");
    println!("  quit              exit (state is not saved)");
}
