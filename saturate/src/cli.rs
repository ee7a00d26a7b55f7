/*!

The command-line surface (spec §6.3), implemented with `clap` derive macros. `Cli::into_config`
turns the raw argument struct into a [`crate::config::RunConfig`]; everything after that point is
argument-parser-agnostic.

*/

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::config::{
  HeuristicSpec, LiteralSelectionStrategy, OrderingSelector, OutputFormat, PreprocessingToggles, ResourceConfig, RunConfig,
};
use crate::parser::InputFormat;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OrderingArg {
  Lpo,
  Kbo,
  Auto,
}

impl From<OrderingArg> for OrderingSelector {
  fn from(value: OrderingArg) -> Self {
    match value {
      OrderingArg::Lpo => OrderingSelector::Lpo,
      OrderingArg::Kbo => OrderingSelector::Kbo,
      OrderingArg::Auto => OrderingSelector::Auto,
    }
  }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum InputFormatArg {
  Auto,
  Tptp,
  Lop,
}

impl From<InputFormatArg> for InputFormat {
  fn from(value: InputFormatArg) -> Self {
    match value {
      InputFormatArg::Auto => InputFormat::Auto,
      InputFormatArg::Tptp => InputFormat::Tptp,
      InputFormatArg::Lop => InputFormat::Lop,
    }
  }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormatArg {
  Tptp,
  Pcl2,
}

impl From<OutputFormatArg> for OutputFormat {
  fn from(value: OutputFormatArg) -> Self {
    match value {
      OutputFormatArg::Tptp => OutputFormat::Tptp,
      OutputFormatArg::Pcl2 => OutputFormat::Pcl2,
    }
  }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LiteralSelectionArg {
  MaximalOnly,
  SelectNegative,
}

impl From<LiteralSelectionArg> for LiteralSelectionStrategy {
  fn from(value: LiteralSelectionArg) -> Self {
    match value {
      LiteralSelectionArg::MaximalOnly => LiteralSelectionStrategy::MaximalOnly,
      LiteralSelectionArg::SelectNegative => LiteralSelectionStrategy::SelectNegative,
    }
  }
}

/// Given-clause saturation prover, accepting TPTP CNF, LOP, or PCL2 input (spec §6.1).
#[derive(Parser, Debug)]
#[command(name = "saturate", version, about)]
pub struct Cli {
  /// Input files to prove; `-` or no files at all means standard input.
  pub inputs: Vec<PathBuf>,

  /// Output destination; omit for standard output.
  #[arg(short = 'o', long)]
  pub output: Option<PathBuf>,

  /// Verbosity level; repeat for more (`-v`, `-vv`, `-vvv`).
  #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
  pub verbosity: u8,

  /// Soft CPU time limit in seconds: the run is asked to wrap up but may overshoot briefly.
  #[arg(long = "cpu-soft-limit", value_name = "SECONDS")]
  pub cpu_soft_limit: Option<u64>,

  /// Hard CPU time limit in seconds: the run is terminated at this point regardless.
  #[arg(long = "cpu-hard-limit", value_name = "SECONDS")]
  pub cpu_hard_limit: Option<u64>,

  /// Wall-clock time limit in seconds.
  #[arg(long = "wall-clock-limit", value_name = "SECONDS")]
  pub wall_clock_limit: Option<u64>,

  /// Memory limit in bytes.
  #[arg(long = "memory-limit", value_name = "BYTES")]
  pub memory_limit: Option<u64>,

  /// An upper bound on given-clause loop iterations, mainly for tests and CI.
  #[arg(long = "max-steps", value_name = "N")]
  pub max_steps: Option<u64>,

  /// A named heuristic preset, or an inline heuristic definition string.
  #[arg(long = "heuristic", default_value = "auto")]
  pub heuristic: String,

  /// Treat `--heuristic`'s argument as an inline definition rather than a preset name.
  #[arg(long = "heuristic-inline", requires = "heuristic")]
  pub heuristic_inline: bool,

  /// Simplification ordering.
  #[arg(long = "ordering", value_enum, default_value = "auto")]
  pub ordering: OrderingArg,

  /// Literal selection strategy.
  #[arg(long = "literal-selection", value_enum, default_value = "select-negative")]
  pub literal_selection: LiteralSelectionArg,

  /// Input format; `auto` sniffs the leading token of the first file.
  #[arg(long = "input-format", value_enum, default_value = "auto")]
  pub input_format: InputFormatArg,

  /// Output format for the proof object and axioms-used listing.
  #[arg(long = "output-format", value_enum, default_value = "tptp")]
  pub output_format: OutputFormatArg,

  /// Emit the full `SZS output start/end CNFRefutation` proof object, not just the status line.
  #[arg(long = "proof-object")]
  pub proof_object: bool,

  /// Emit only the axioms that contributed to the proof (spec §4.10's "axioms used" mode),
  /// instead of the full derivation.
  #[arg(long = "axioms-used")]
  pub axioms_used: bool,

  /// Enable clause unfolding during preprocessing.
  #[arg(long = "unfolding")]
  pub unfolding: bool,

  /// Enable definition introduction during preprocessing.
  #[arg(long = "definition-introduction")]
  pub definition_introduction: bool,

  /// Enable blocked-clause elimination during preprocessing.
  #[arg(long = "blocked-clause-elimination")]
  pub blocked_clause_elimination: bool,

  /// Enable predicate elimination during preprocessing.
  #[arg(long = "predicate-elimination")]
  pub predicate_elimination: bool,

  /// Enable SInE relevance filtering during preprocessing.
  #[arg(long = "sine-filtering")]
  pub sine_relevance_filtering: bool,
}

impl Cli {
  pub fn into_config(self) -> RunConfig {
    let heuristic = if self.heuristic_inline {
      HeuristicSpec::Inline(self.heuristic)
    } else {
      HeuristicSpec::Named(self.heuristic)
    };

    RunConfig {
      input_files: self.inputs,
      output_file: self.output,
      verbosity: self.verbosity,
      resources: ResourceConfig {
        cpu_soft_limit: self.cpu_soft_limit.map(Duration::from_secs),
        cpu_hard_limit: self.cpu_hard_limit.map(Duration::from_secs),
        wall_clock_limit: self.wall_clock_limit.map(Duration::from_secs),
        memory_limit_bytes: self.memory_limit,
        max_steps: self.max_steps,
      },
      heuristic,
      ordering: self.ordering.into(),
      literal_selection: self.literal_selection.into(),
      input_format: self.input_format.into(),
      output_format: self.output_format.into(),
      emit_proof_object: self.proof_object,
      emit_axioms_used: self.axioms_used,
      preprocessing: PreprocessingToggles {
        unfolding: self.unfolding,
        definition_introduction: self.definition_introduction,
        blocked_clause_elimination: self.blocked_clause_elimination,
        predicate_elimination: self.predicate_elimination,
        sine_relevance_filtering: self.sine_relevance_filtering,
      },
    }
  }
}

/// Process exit codes (spec §7): distinct codes per termination reason plus the usage/syntax/
/// system-error codes clap and I/O failures fall back to.
pub mod exit_code {
  pub const PROOF_FOUND_OR_SATISFIABLE: i32 = 0;
  pub const RESOURCE_OUT: i32 = 1;
  pub const CPU_LIMIT: i32 = 2;
  pub const MEMORY_LIMIT: i32 = 3;
  pub const GAVE_UP: i32 = 4;
  pub const SYNTAX_ERROR: i32 = 5;
  pub const SEMANTIC_ERROR: i32 = 6;
  pub const IO_ERROR: i32 = 7;
  pub const INTERNAL_ERROR: i32 = 8;
}

/// Maps a run's terminal error to a process exit code.
pub fn exit_code_for(error: &crate::error::SaturateError) -> i32 {
  use crate::error::SaturateError;
  use sat_core::error::TerminationReason;

  match error {
    SaturateError::Syntax { .. } => exit_code::SYNTAX_ERROR,
    SaturateError::Semantic(_) => exit_code::SEMANTIC_ERROR,
    SaturateError::Io { .. } => exit_code::IO_ERROR,
    SaturateError::Core(_) => exit_code::INTERNAL_ERROR,
    SaturateError::ResourceOut(reason) => match reason {
      TerminationReason::ResourceOut => exit_code::RESOURCE_OUT,
      TerminationReason::GaveUp => exit_code::GAVE_UP,
      _ => exit_code::INTERNAL_ERROR,
    },
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn defaults_select_auto_ordering_and_select_negative_literals() {
    let cli = Cli::parse_from(["saturate", "problem.p"]);
    assert_eq!(cli.ordering, OrderingArg::Auto);
    assert_eq!(cli.literal_selection, LiteralSelectionArg::SelectNegative);
    assert_eq!(cli.inputs, vec![PathBuf::from("problem.p")]);
  }

  #[test]
  fn heuristic_inline_flag_changes_the_config_variant() {
    let cli = Cli::parse_from(["saturate", "--heuristic", "(1*StandardWeight)", "--heuristic-inline"]);
    let config = cli.into_config();
    assert!(matches!(config.heuristic, HeuristicSpec::Inline(_)));
  }

  #[test]
  fn axioms_used_flag_is_off_by_default_and_settable() {
    let default_config = Cli::parse_from(["saturate"]).into_config();
    assert!(!default_config.emit_axioms_used);

    let config = Cli::parse_from(["saturate", "--axioms-used"]).into_config();
    assert!(config.emit_axioms_used);
  }
}
