/*!

The `saturate` binary: reads one or more clause files (or standard input), builds a
[`sat_core::saturation::proof_state::ProofState`], runs the given-clause loop under the configured
resource limits, and renders the outcome as an SZS status line plus, on request, a proof object or
axioms-used listing.

*/

use std::fs;
use std::io::{Read, Write as _};
use std::process::ExitCode;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use clap::Parser as _;

use sat_core::core::clause::Clause;
use sat_core::core::ordering::derive_precedence;
use sat_core::core::signature::Signature;
use sat_core::core::term_bank::TermBank;
use sat_core::heuristic::hcb::{Hcb, PriorityQueue, ScheduleStep};
use sat_core::heuristic::weights::StandardWeight;
use sat_core::saturation::main_loop;
use sat_core::saturation::proof_state::ProofState;

use saturate::cli::{exit_code, exit_code_for, Cli};
use saturate::config::RunConfig;
use saturate::error::{SaturateError, SaturateResult};
use saturate::output;
use saturate::parser::{self, ast::Role};

fn main() -> ExitCode {
  let config = Cli::parse().into_config();

  let default_level = match config.verbosity {
    0 => tracing::level_filters::LevelFilter::WARN,
    1 => tracing::level_filters::LevelFilter::INFO,
    2 => tracing::level_filters::LevelFilter::DEBUG,
    _ => tracing::level_filters::LevelFilter::TRACE,
  };
  let filter = tracing_subscriber::EnvFilter::builder()
    .with_default_directive(default_level.into())
    .from_env_lossy();
  tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

  match run(config) {
    Ok(code) => ExitCode::from(code as u8),
    Err(err) => {
      eprintln!("saturate: {err}");
      ExitCode::from(exit_code_for(&err) as u8)
    }
  }
}

fn read_inputs(config: &RunConfig) -> SaturateResult<String> {
  if config.input_files.is_empty() {
    let mut buffer = String::new();
    std::io::stdin()
      .read_to_string(&mut buffer)
      .map_err(|source| SaturateError::Io { path: "<stdin>".to_string(), source })?;
    return Ok(buffer);
  }

  let mut combined = String::new();
  for path in &config.input_files {
    if path.as_os_str() == "-" {
      std::io::stdin()
        .read_to_string(&mut combined)
        .map_err(|source| SaturateError::Io { path: "<stdin>".to_string(), source })?;
      continue;
    }
    let text = fs::read_to_string(path).map_err(|source| SaturateError::Io { path: path.display().to_string(), source })?;
    combined.push_str(&text);
    combined.push('\n');
  }
  Ok(combined)
}

fn run(config: RunConfig) -> SaturateResult<i32> {
  let source = read_inputs(&config)?;
  let file_label = config
    .input_files
    .first()
    .map(|p| p.display().to_string())
    .unwrap_or_else(|| "<stdin>".to_string());

  let mut signature = Signature::new();
  let mut bank = TermBank::new(sat_core::core::signature::reserved::TRUE);

  let mut next_id = 0u64;
  let lowered = parser::parse_and_lower(&source, &file_label, config.input_format, &mut signature, &mut bank, || {
    let id = sat_core::core::clause::ClauseId(next_id);
    next_id += 1;
    id
  })?;

  let hcb = Hcb::new(vec![PriorityQueue::new(Box::new(StandardWeight))], vec![ScheduleStep { queue: 0, steps: 1 }]);
  // Every symbol the input declared must be precedence-comparable, or LPO/KBO degrade to
  // `Uncomparable` for any pair the default (empty) precedence never heard of.
  let precedence = derive_precedence(&signature);
  let ordering = config.ordering.build(precedence);
  let mut state = ProofState::new(signature, bank, ordering, hcb);

  for (decl, mut clause) in lowered {
    clause.id = state.fresh_clause_id();
    negate_if_conjecture(&decl.role, &mut clause);
    state.add_axiom(clause);
  }

  let interrupt = Arc::new(AtomicBool::new(false));
  {
    let interrupt = interrupt.clone();
    // Best-effort: a platform without a controlling terminal (or a sandboxed test harness) may
    // reject the handler registration; a prover that can't be interrupted early is still correct,
    // just less considerate, so this is not a fatal error.
    let _ = ctrlc::set_handler(move || {
      interrupt.store(true, std::sync::atomic::Ordering::Relaxed);
    });
  }
  config.resources.spawn_watchdog(interrupt.clone());
  let limits = config.resources.to_resource_limits(interrupt);

  let outcome = main_loop::run(&mut state, &limits);
  let true_term = state.term_bank.true_term();

  let mut sink = open_output(&config)?;

  match outcome {
    Ok(empty_id) => {
      writeln!(sink, "% SZS status {}", output::szs_status(sat_core::error::TerminationReason::Unsatisfiable))
        .map_err(|source| SaturateError::Io { path: output_label(&config), source })?;
      if let Some(proof) = sat_core::proof::reconstruct(&state.clauses, empty_id) {
        if config.emit_axioms_used {
          let axioms = sat_core::proof::axioms_used(&proof, &state.clauses);
          write!(sink, "{}", output::render_axioms_used(&state.signature, &true_term, &state.clauses, &axioms))
        } else if config.emit_proof_object {
          let rendered = match config.output_format {
            saturate::config::OutputFormat::Pcl2 => output::render_proof(&state.signature, &true_term, &state.clauses, &proof),
            saturate::config::OutputFormat::Tptp => output::render_proof_tptp(&state.signature, &true_term, &state.clauses, &proof),
          };
          writeln!(sink, "% SZS output start CNFRefutation")
            .and_then(|_| write!(sink, "{rendered}"))
            .and_then(|_| writeln!(sink, "% SZS output end CNFRefutation"))
        } else {
          Ok(())
        }
        .map_err(|source| SaturateError::Io { path: output_label(&config), source })?;
      }
      Ok(exit_code::PROOF_FOUND_OR_SATISFIABLE)
    }
    Err(reason) => {
      writeln!(sink, "% SZS status {}", output::szs_status(reason)).map_err(|source| SaturateError::Io { path: output_label(&config), source })?;
      match reason {
        sat_core::error::TerminationReason::Satisfiable => Ok(exit_code::PROOF_FOUND_OR_SATISFIABLE),
        other => Err(SaturateError::ResourceOut(other)),
      }
    }
  }
}

fn output_label(config: &RunConfig) -> String {
  config.output_file.as_ref().map(|p| p.display().to_string()).unwrap_or_else(|| "<stdout>".to_string())
}

fn open_output(config: &RunConfig) -> SaturateResult<Box<dyn std::io::Write>> {
  match &config.output_file {
    Some(path) => {
      let file = fs::File::create(path).map_err(|source| SaturateError::Io { path: path.display().to_string(), source })?;
      Ok(Box::new(file))
    }
    None => Ok(Box::new(std::io::stdout())),
  }
}

/// A `negated_conjecture` clause is already in refutation form; a bare `conjecture` still needs
/// negating before it can be asserted alongside the axioms (spec §6.1's role semantics). Either
/// way the clause is marked as a conjecture descendant so proof output can highlight it.
fn negate_if_conjecture(role: &Role, clause: &mut Clause) {
  match role {
    Role::Conjecture => {
      for literal in &mut clause.literals {
        literal.positive = !literal.positive;
      }
      clause.properties.insert(sat_core::core::clause::ClauseProperty::ConjectureDescendant);
    }
    Role::NegatedConjecture => {
      clause.properties.insert(sat_core::core::clause::ClauseProperty::ConjectureDescendant);
    }
    Role::Axiom | Role::Plain => {}
  }
}
