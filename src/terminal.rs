use crate::app::{App, EntryMode, Screen};
use crate::components::label_upload::ImageSource;
use crate::components::meal_entry::MealField;
use crate::platform::console::Console;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Quit,
    ToggleMode,
    Refresh,
    AddMeal,
    Scan(ImageSource),
    Help,
}

/// Maps a main-screen line to a command. Entry actions only exist in the
/// mode that shows them.
pub fn parse_command(line: &str, mode: EntryMode) -> Command {
    match (line.trim().to_ascii_lowercase().as_str(), mode) {
        ("q" | "quit", _) => Command::Quit,
        ("t" | "toggle", _) => Command::ToggleMode,
        ("r" | "refresh", _) => Command::Refresh,
        ("a" | "add", EntryMode::Manual) => Command::AddMeal,
        ("c" | "camera", EntryMode::Scan) => Command::Scan(ImageSource::Camera),
        ("g" | "gallery", EntryMode::Scan) => Command::Scan(ImageSource::Library),
        _ => Command::Help,
    }
}

fn help(mode: EntryMode) -> &'static str {
    match mode {
        EntryMode::Manual => "Commands: [a] add meal  [t] switch to scan  [r] refresh  [q] quit",
        EntryMode::Scan => {
            "Commands: [c] take photo  [g] choose image  [t] switch to manual  [r] refresh  [q] quit"
        }
    }
}

enum Input {
    Line(Option<String>),
    MealsLoaded,
}

/// Reads a line, unless the initial meals read lands first. The caller
/// redraws on `MealsLoaded`; a partly typed line stays buffered.
async fn next_input(app: &mut App, console: &Console, label: &str) -> anyhow::Result<Input> {
    if !app.has_pending_meals() {
        return Ok(Input::Line(console.prompt(label).await?));
    }

    tokio::select! {
        line = console.prompt(label) => Ok(Input::Line(line?)),
        _ = app.settle_meals() => Ok(Input::MealsLoaded),
    }
}

/// Drives the controller from line input until `q` or end of input.
pub async fn run(app: &mut App, console: &Console) -> anyhow::Result<()> {
    loop {
        if app.screen() == Screen::Loading {
            console.print(&app.render()).await?;
            app.mount().await;
            continue;
        }

        console.print(&app.render()).await?;

        if app.screen() == Screen::WeightEntry {
            let line = match next_input(app, console, "Weight (q to quit): ").await? {
                Input::Line(Some(line)) => line,
                Input::Line(None) => break,
                Input::MealsLoaded => continue,
            };
            if line.eq_ignore_ascii_case("q") {
                break;
            }
            app.weight_form_mut().set_input(line);
            app.submit_weight().await;
            continue;
        }

        let mode = app.state().entry_mode;
        console.print(help(mode)).await?;
        let line = match next_input(app, console, "> ").await? {
            Input::Line(Some(line)) => line,
            Input::Line(None) => break,
            Input::MealsLoaded => continue,
        };

        match parse_command(&line, mode) {
            Command::Quit => break,
            Command::ToggleMode => app.toggle_entry_mode(),
            Command::Refresh => app.refresh_meals().await,
            Command::AddMeal => {
                for field in MealField::ALL {
                    let current = app.meal_form().field(field).to_string();
                    let label = if current.is_empty() {
                        format!("{}: ", field.label())
                    } else {
                        format!("{} [{}]: ", field.label(), current)
                    };
                    let Some(value) = console.prompt(&label).await? else {
                        return Ok(());
                    };
                    if !value.is_empty() {
                        app.meal_form_mut().set_field(field, value);
                    }
                }
                app.submit_meal().await;
            }
            Command::Scan(source) => app.scan_label(source).await,
            Command::Help => {}
        }
    }

    tracing::debug!("Terminal session ended");
    Ok(())
}
