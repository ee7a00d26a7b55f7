/*!

Run configuration: the typed form of the command-line surface (spec §6.3), independent of how it
was obtained (so unit tests can build a [`RunConfig`] directly without going through `clap`).

*/

use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Duration;

use sat_core::core::ordering::{Kbo, Lpo, Ordering, Precedence};
use sat_core::saturation::main_loop::ResourceLimits;

use crate::parser::InputFormat;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OrderingSelector {
  Lpo,
  Kbo,
  Auto,
}

impl OrderingSelector {
  /// Builds the concrete ordering. `Auto` currently resolves to LPO (spec §9(a) defers literal
  /// selection and ordering strategy to the superposition literature rather than a specific
  /// heuristic; LPO is the simpler of the two and a reasonable default absent further signal).
  pub fn build(self, precedence: Precedence) -> Box<dyn Ordering> {
    match self {
      OrderingSelector::Lpo | OrderingSelector::Auto => Box::new(Lpo::new(precedence)),
      OrderingSelector::Kbo => Box::new(Kbo::new(precedence)),
    }
  }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LiteralSelectionStrategy {
  /// No restriction: every maximal literal is eligible.
  MaximalOnly,
  /// Prefer selecting a single negative literal when one exists, per the standard superposition
  /// completeness argument for selection functions.
  SelectNegative,
}

#[derive(Clone, Debug)]
pub enum HeuristicSpec {
  Named(String),
  /// An inline heuristic definition in the surface syntax the HCB module would otherwise read
  /// from a named preset file; parsing this is future work (`config::KnowledgeBase`-adjacent).
  Inline(String),
}

impl Default for HeuristicSpec {
  fn default() -> Self {
    HeuristicSpec::Named("auto".to_string())
  }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct PreprocessingToggles {
  pub unfolding: bool,
  pub definition_introduction: bool,
  pub blocked_clause_elimination: bool,
  pub predicate_elimination: bool,
  pub sine_relevance_filtering: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OutputFormat {
  Tptp,
  Pcl2,
}

/// Resource caps translated from the CLI's seconds/bytes into the types the core and the process
/// environment actually consume.
#[derive(Clone, Debug, Default)]
pub struct ResourceConfig {
  pub cpu_soft_limit: Option<Duration>,
  pub cpu_hard_limit: Option<Duration>,
  pub wall_clock_limit: Option<Duration>,
  pub memory_limit_bytes: Option<u64>,
  pub max_steps: Option<u64>,
}

impl ResourceConfig {
  /// Builds the cooperative interrupt flag and step cap the main loop polls. Wall-clock/CPU/memory
  /// enforcement against the flag is the caller's job (a watchdog thread or signal handler); the
  /// core only ever sees "stop now".
  pub fn to_resource_limits(&self, interrupt: Arc<AtomicBool>) -> ResourceLimits {
    ResourceLimits { max_steps: self.max_steps, interrupt }
  }

  /// Spawns the soft/hard time-limit watchdog (spec §5's "cancellation" policy): at the soft
  /// limit the interrupt flag is raised so the loop can wrap up at its next check; if the loop is
  /// still running at the hard limit the process is terminated outright. Actual CPU-time
  /// accounting needs a platform-specific API this workspace has no dependency for, so both
  /// limits are measured in wall-clock time, the coarser of the two — a reasonable approximation
  /// for a single-threaded, otherwise-idle prover process. Does nothing if no limit was set.
  pub fn spawn_watchdog(&self, interrupt: Arc<AtomicBool>) {
    let soft = self.cpu_soft_limit.or(self.wall_clock_limit);
    let hard = self.cpu_hard_limit;
    if soft.is_none() && hard.is_none() {
      return;
    }
    std::thread::spawn(move || {
      if let Some(soft) = soft {
        std::thread::sleep(soft);
        interrupt.store(true, std::sync::atomic::Ordering::Relaxed);
      }
      if let Some(hard) = hard {
        let remaining = hard.saturating_sub(soft.unwrap_or_default());
        std::thread::sleep(remaining);
        std::process::exit(crate::cli::exit_code::CPU_LIMIT);
      }
    });
  }
}

#[derive(Clone, Debug)]
pub struct RunConfig {
  pub input_files: Vec<PathBuf>,
  pub output_file: Option<PathBuf>,
  pub verbosity: u8,
  pub resources: ResourceConfig,
  pub heuristic: HeuristicSpec,
  pub ordering: OrderingSelector,
  pub literal_selection: LiteralSelectionStrategy,
  pub input_format: InputFormat,
  pub output_format: OutputFormat,
  pub emit_proof_object: bool,
  pub emit_axioms_used: bool,
  pub preprocessing: PreprocessingToggles,
}

/// The external knowledge-base collaborator (spec §6.4): a directory of plain-text files —
/// description, signature, problems, and clause patterns. The saturation core neither reads nor
/// writes these; this type only names the expected layout so a future front end has somewhere to
/// grow into.
#[derive(Clone, Debug)]
pub struct KnowledgeBase {
  pub directory: PathBuf,
}

impl KnowledgeBase {
  pub fn new(directory: PathBuf) -> Self {
    Self { directory }
  }

  pub fn description_file(&self) -> PathBuf {
    self.directory.join("description")
  }

  pub fn signature_file(&self) -> PathBuf {
    self.directory.join("signature")
  }

  pub fn problems_file(&self) -> PathBuf {
    self.directory.join("problems")
  }

  pub fn clause_patterns_file(&self) -> PathBuf {
    self.directory.join("clause_patterns")
  }
}
