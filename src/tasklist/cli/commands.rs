//! # CLI Layer
//!
//! One possible client of the library. This is the only place that:
//! - parses arguments
//! - installs the log subscriber
//! - writes to stdout/stderr and picks the exit code
//!
//! Every handler drives a view model and then checks its `error_message()`. A
//! message there means the action failed: it is printed on stderr and the
//! process exits with status 1.

use super::print::{print_agenda, print_config, print_error, print_lists, print_success, print_task};
use super::setup::{Cli, Commands};
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use clap::Parser;
use std::collections::HashMap;
use std::path::PathBuf;
use std::process::ExitCode;
use tasklist::config::{TaskConfig, CONFIG_KEYS};
use tasklist::error::{Result, TaskError};
use tasklist::index::{resolve_list, resolve_task, task_label, Selector};
use tasklist::init::{initialize, TaskPaths};
use tasklist::model::{Category, Task, TaskList};
use tasklist::repository::SharedRepository;
use tasklist::viewmodel::{AgendaViewModel, NewTask, TaskDetailViewModel, TaskListViewModel};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};
use uuid::Uuid;

pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match execute(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            print_error(&format!("Error: {}", e.user_message()));
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "warn,tasklist=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    // A second init (tests calling run twice) is harmless.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init();
}

fn execute(cli: Cli) -> Result<()> {
    let home = cli.home;
    // Opening the store may seed it, so `config` never does.
    let open = || initialize(home.clone()).map(|ctx| ctx.repository);

    match cli.command.unwrap_or(Commands::Lists) {
        Commands::Lists => handle_lists(open()?),
        Commands::Agenda => handle_agenda(open()?),
        Commands::AddList { name, category } => handle_add_list(open()?, name, category),
        Commands::RenameList {
            list,
            name,
            category,
        } => handle_rename_list(open()?, list, name, category),
        Commands::RmList { lists } => handle_rm_list(open()?, lists),
        Commands::Add {
            list,
            title,
            details,
            due,
            in_days,
            category,
            icon,
        } => {
            let due_date = match (due, in_days) {
                (Some(date), _) => start_of_day(date),
                (None, Some(days)) => due_in_days(Utc::now(), days)?,
                (None, None) => Utc::now(),
            };
            handle_add(open()?, list, title, details, due_date, category, icon)
        }
        Commands::Edit {
            task,
            title,
            details,
            due,
            category,
            list,
        } => handle_edit(open()?, task, title, details, due, category, list),
        Commands::Toggle { task } => handle_toggle(open()?, task),
        Commands::Rm { tasks } => handle_rm(open()?, tasks),
        Commands::Show { task } => handle_show(open()?, task),
        Commands::Config { key, value } => handle_config(home.clone(), key, value),
    }
}

/// Turn a view model's failure message into an error for `run`.
fn check(error_message: Option<&str>) -> Result<()> {
    match error_message {
        Some(message) => Err(TaskError::Api(message.to_string())),
        None => Ok(()),
    }
}

fn loaded_lists(repo: &SharedRepository) -> Result<TaskListViewModel> {
    let mut vm = TaskListViewModel::new(repo.clone());
    vm.load_lists();
    check(vm.error_message())?;
    Ok(vm)
}

fn select_list(lists: &[TaskList], input: &str) -> Result<TaskList> {
    let selector: Selector = input.parse()?;
    resolve_list(lists, &selector).cloned()
}

fn select_task(lists: &[TaskList], input: &str) -> Result<Task> {
    let selector: Selector = input.parse()?;
    resolve_task(lists, &selector).cloned()
}

/// Position label and list name of a task, as shown by `tl lists`.
fn locate(lists: &[TaskList], id: Uuid) -> Option<(String, String)> {
    lists.iter().enumerate().find_map(|(i, list)| {
        list.tasks
            .iter()
            .position(|t| t.id == id)
            .map(|j| (task_label(i, j), list.name.clone()))
    })
}

fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// `now` moved forward (or back) by whole days, or an error when out of range.
fn due_in_days(now: DateTime<Utc>, days: i64) -> Result<DateTime<Utc>> {
    Duration::try_days(days)
        .and_then(|delta| now.checked_add_signed(delta))
        .ok_or_else(|| TaskError::Api(format!("--in-days {} is out of range", days)))
}

fn handle_lists(repo: SharedRepository) -> Result<()> {
    let vm = loaded_lists(&repo)?;
    print_lists(vm.lists());
    Ok(())
}

fn handle_agenda(repo: SharedRepository) -> Result<()> {
    let lists = loaded_lists(&repo)?;
    let mut agenda = AgendaViewModel::new(repo);
    agenda.load();
    check(agenda.error_message())?;

    let positions: HashMap<Uuid, (String, String)> = agenda
        .tasks()
        .iter()
        .filter_map(|t| locate(lists.lists(), t.id).map(|pos| (t.id, pos)))
        .collect();

    let rows: Vec<_> = agenda
        .tasks()
        .iter()
        .map(|task| {
            let (label, list_name) = positions
                .get(&task.id)
                .cloned()
                .unwrap_or_else(|| (task.id.to_string(), String::new()));
            (label, list_name, task.clone())
        })
        .collect();
    print_agenda(&rows);
    Ok(())
}

fn handle_add_list(repo: SharedRepository, name: String, category: Category) -> Result<()> {
    let mut vm = TaskListViewModel::new(repo);
    vm.add_list(&name, category);
    check(vm.error_message())?;
    print_success(&format!("Created list \"{}\"", name));
    Ok(())
}

fn handle_rename_list(
    repo: SharedRepository,
    list: String,
    name: String,
    category: Option<Category>,
) -> Result<()> {
    let mut vm = loaded_lists(&repo)?;
    let mut target = select_list(vm.lists(), &list)?;
    let old_name = std::mem::replace(&mut target.name, name);
    if let Some(category) = category {
        target.category = category;
    }

    vm.update_list(&target);
    check(vm.error_message())?;
    print_success(&format!("Renamed \"{}\" to \"{}\"", old_name, target.name));
    Ok(())
}

fn handle_rm_list(repo: SharedRepository, inputs: Vec<String>) -> Result<()> {
    let mut vm = loaded_lists(&repo)?;

    // Resolve everything up front; positions shift once deleting starts.
    let mut offsets = Vec::with_capacity(inputs.len());
    for input in &inputs {
        let list = select_list(vm.lists(), input)?;
        if let Some(offset) = vm.lists().iter().position(|l| l.id == list.id) {
            if !offsets.contains(&offset) {
                offsets.push(offset);
            }
        }
    }
    let names: Vec<_> = offsets.iter().map(|&i| vm.lists()[i].name.clone()).collect();

    vm.delete_lists(&offsets);
    check(vm.error_message())?;
    for name in names {
        print_success(&format!("Deleted list \"{}\"", name));
    }
    Ok(())
}

fn handle_add(
    repo: SharedRepository,
    list: String,
    title: String,
    details: String,
    due_date: DateTime<Utc>,
    category: Option<Category>,
    icon: Option<String>,
) -> Result<()> {
    let mut vm = loaded_lists(&repo)?;
    let target = select_list(vm.lists(), &list)?;

    vm.add_task(
        &target,
        NewTask {
            icon_name: icon,
            title: title.clone(),
            details,
            due_date,
            category: category.unwrap_or(target.category),
        },
    );
    check(vm.error_message())?;
    print_success(&format!("Added \"{}\" to \"{}\"", title, target.name));
    Ok(())
}

fn handle_edit(
    repo: SharedRepository,
    task: String,
    title: Option<String>,
    details: Option<String>,
    due: Option<NaiveDate>,
    category: Option<Category>,
    list: Option<String>,
) -> Result<()> {
    let mut vm = loaded_lists(&repo)?;
    let mut target = select_task(vm.lists(), &task)?;

    if let Some(title) = title {
        target.title = title;
    }
    if let Some(details) = details {
        target.details = details;
    }
    if let Some(due) = due {
        target.due_date = start_of_day(due);
    }
    if let Some(category) = category {
        target.category = category;
    }
    if let Some(list) = list {
        target.list_id = select_list(vm.lists(), &list)?.id;
    }

    vm.update_task(&target);
    check(vm.error_message())?;
    print_success(&format!("Updated \"{}\"", target.title));
    Ok(())
}

fn handle_toggle(repo: SharedRepository, task: String) -> Result<()> {
    let lists = loaded_lists(&repo)?;
    let target = select_task(lists.lists(), &task)?;

    let mut detail = TaskDetailViewModel::new(repo, target.id);
    detail.load_task();
    check(detail.error_message())?;
    detail.toggle_status();
    check(detail.error_message())?;

    match detail.task() {
        Some(task) => {
            let state = if task.status.is_completed() { "completed" } else { "pending" };
            print_success(&format!("\"{}\" is now {}", task.title, state))
        }
        None => return Err(TaskError::TaskNotFound(target.id)),
    }
    Ok(())
}

fn handle_rm(repo: SharedRepository, inputs: Vec<String>) -> Result<()> {
    let mut vm = loaded_lists(&repo)?;
    let targets = inputs
        .iter()
        .map(|input| select_task(vm.lists(), input))
        .collect::<Result<Vec<_>>>()?;

    for task in targets {
        vm.delete_task(&task);
        check(vm.error_message())?;
        print_success(&format!("Deleted \"{}\"", task.title));
    }
    Ok(())
}

fn handle_show(repo: SharedRepository, task: String) -> Result<()> {
    let lists = loaded_lists(&repo)?;
    let target = select_task(lists.lists(), &task)?;
    let (label, list_name) =
        locate(lists.lists(), target.id).unwrap_or_else(|| (task.clone(), String::new()));

    let mut detail = TaskDetailViewModel::new(repo, target.id);
    detail.load_task();
    check(detail.error_message())?;
    match detail.task() {
        Some(task) => print_task(&label, &list_name, task),
        None => return Err(TaskError::TaskNotFound(target.id)),
    }
    Ok(())
}

fn handle_config(home: Option<PathBuf>, key: Option<String>, value: Option<String>) -> Result<()> {
    let paths = TaskPaths::resolve(home)?;
    let mut config = TaskConfig::load(&paths.data_dir)?;

    match (key, value) {
        (None, _) => {
            let entries = CONFIG_KEYS
                .iter()
                .map(|key| config.get(key).map(|value| (*key, value)))
                .collect::<Result<Vec<_>>>()?;
            print_config(&entries);
        }
        (Some(key), None) => print_config(&[(key.as_str(), config.get(&key)?)]),
        (Some(key), Some(value)) => {
            config.set(&key, &value)?;
            config.save(&paths.data_dir)?;
            print_success(&format!("{} = {}", key, config.get(&key)?));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn in_days_moves_the_due_date() {
        let now = Utc.with_ymd_and_hms(2024, 5, 10, 12, 0, 0).unwrap();
        assert_eq!(due_in_days(now, 3).unwrap(), now + Duration::days(3));
        assert_eq!(due_in_days(now, -1).unwrap(), now - Duration::days(1));
    }

    #[test]
    fn in_days_out_of_range_is_an_error() {
        let now = Utc::now();
        for days in [9_999_999_999_999, 99_999_999_999, i64::MIN] {
            let err = due_in_days(now, days).unwrap_err();
            assert!(err.user_message().contains("out of range"), "{}", days);
        }
    }
}
