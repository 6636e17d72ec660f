use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use members_core::{
    config::{load_settings, load_settings_from},
    presentation::{PresentationData, Theme},
    state::ControllerState,
    transition::NavigationButton,
    Entry, MembersScreen, Operation, StableId,
};
use serde::{Deserialize, Serialize};
use shared::{
    domain::{Peer, PeerId, PeerView},
    participant::RenderedParticipant,
};
use tracing::info;

/// Replays a members-list scenario and prints one JSON line per step.
#[derive(Parser, Debug)]
struct Args {
    #[arg(long)]
    scenario: PathBuf,
    /// Settings file; defaults to `members.toml` in the working directory.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
struct Scenario {
    viewer: PeerId,
    channel: Peer,
    steps: Vec<Step>,
}

#[derive(Debug, Deserialize)]
struct Step {
    participants: Option<Vec<RenderedParticipant>>,
    #[serde(default)]
    state: Option<ControllerState>,
}

#[derive(Debug, Serialize)]
struct StepReport<'a> {
    step: usize,
    title: &'a str,
    animate: bool,
    loading: bool,
    navigation_button: Option<&'a NavigationButton>,
    rows: Vec<StableId>,
    operations: Vec<Operation<StableId>>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("info")
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let settings = match &args.config {
        Some(path) => load_settings_from(path)?,
        None => load_settings(),
    };
    let raw = fs::read_to_string(&args.scenario)
        .with_context(|| format!("failed to read scenario '{}'", args.scenario.display()))?;
    let scenario: Scenario = serde_json::from_str(&raw)
        .with_context(|| format!("invalid scenario '{}'", args.scenario.display()))?;

    let presentation = PresentationData::new(Theme::default(), settings.strings);
    let view = PeerView::loaded(scenario.channel);
    let mut screen = MembersScreen::new(scenario.viewer);
    let mut state = ControllerState::default();

    for (index, step) in scenario.steps.into_iter().enumerate() {
        if let Some(next) = step.state {
            state = next;
        }
        let update = screen
            .render(&presentation, &view, &state, step.participants.as_deref())
            .with_context(|| format!("step {index} could not be reconciled"))?;

        let report = StepReport {
            step: index,
            title: &update.title,
            animate: update.list.animate,
            loading: update.list.empty_state.is_some(),
            navigation_button: update.navigation_button.as_ref(),
            rows: update.list.entries.iter().map(Entry::stable_id).collect(),
            operations: update
                .list
                .operations
                .iter()
                .cloned()
                .map(|op| op.map_entry(|entry| entry.stable_id()))
                .collect(),
        };
        println!("{}", serde_json::to_string(&report)?);
    }

    info!(scenario = %args.scenario.display(), "scenario replayed");
    Ok(())
}
