//! Progress reporting for build runs

use buildcrew_application::BuildProgressNotifier;
use buildcrew_domain::{Agent, AgentRole, AgentStatus, Phase, RunState};
use colored::Colorize;
use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// Reports progress with one bar per agent
pub struct ProgressReporter {
    multi: MultiProgress,
    bars: Mutex<HashMap<AgentRole, ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self::with_draw_target(ProgressDrawTarget::stderr())
    }

    pub fn with_draw_target(target: ProgressDrawTarget) -> Self {
        Self {
            multi: MultiProgress::with_draw_target(target),
            bars: Mutex::new(HashMap::new()),
        }
    }

    fn agent_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:<18.bold.cyan} [{bar:30.cyan/blue}] {pos:>3}% {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn bars(&self) -> MutexGuard<'_, HashMap<AgentRole, ProgressBar>> {
        self.bars.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replace the bars of a previous run with fresh idle ones
    fn reset_bars(&self) {
        let mut bars = self.bars();
        for (_, bar) in bars.drain() {
            bar.finish_and_clear();
            self.multi.remove(&bar);
        }
        for role in AgentRole::ALL {
            let bar = self.multi.add(ProgressBar::new(100));
            bar.set_style(Self::agent_style());
            bar.set_prefix(role.display_name());
            bar.set_message("waiting".dimmed().to_string());
            bars.insert(role, bar);
        }
    }

    #[cfg(test)]
    fn position(&self, role: AgentRole) -> Option<u64> {
        self.bars().get(&role).map(ProgressBar::position)
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl BuildProgressNotifier for ProgressReporter {
    fn on_run_state(&self, state: RunState) {
        if state == RunState::Running {
            self.reset_bars();
        }
    }

    fn on_agent_update(&self, agent: &Agent) {
        let bars = self.bars();
        let Some(bar) = bars.get(&agent.role) else {
            return;
        };

        bar.set_position(u64::from(agent.progress));
        match agent.status {
            AgentStatus::Idle => bar.set_message("waiting".dimmed().to_string()),
            AgentStatus::Working => {
                bar.enable_steady_tick(Duration::from_millis(120));
                bar.set_message("working".yellow().to_string());
            }
            AgentStatus::Completed => {
                bar.finish_with_message(format!("{} done", "v".green()));
            }
            AgentStatus::Error => {
                bar.abandon_with_message(format!("{} failed", "x".red()));
            }
        }
    }

    fn on_phase_start(&self, phase: Phase) {
        let _ = self
            .multi
            .println(format!("{} {}", "->".cyan(), phase.display_name().bold()));
    }
}

/// Simple text-based progress (no fancy UI), written to stderr
///
/// Used when stderr is not a terminal, e.g. in CI logs.
pub struct SimpleProgress;

impl BuildProgressNotifier for SimpleProgress {
    fn on_run_state(&self, state: RunState) {
        match state {
            RunState::Running => eprintln!("{}", "Build started".bold()),
            RunState::Succeeded => eprintln!("{}\n", "Build succeeded".green().bold()),
            RunState::Failed => eprintln!("{}\n", "Build failed".red().bold()),
            RunState::Idle => {}
        }
    }

    fn on_phase_start(&self, phase: Phase) {
        eprintln!(
            "{} {} ({})",
            "->".cyan(),
            phase.display_name().bold(),
            phase.agent().display_name()
        );
    }

    fn on_phase_complete(&self, phase: Phase, success: bool) {
        if success {
            eprintln!("  {} {}", "v".green(), phase.display_name());
        } else {
            eprintln!("  {} {} (failed)", "x".red(), phase.display_name());
        }
    }
}
