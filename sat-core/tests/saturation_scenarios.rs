//! End-to-end saturation scenarios, built directly against the core API (no parser involved —
//! that lives in the `saturate` crate). These mirror the concrete scenarios enumerated for the
//! given-clause loop: a ground contradiction resolved in two steps, and a satisfiable input whose
//! unprocessed set empties without ever deriving the empty clause.

use enumflags2::BitFlags;
use sat_abs::SmallVec;
use sat_core::core::clause::{Clause, ClauseId};
use sat_core::core::literal::Literal;
use sat_core::core::ordering::{Lpo, Precedence};
use sat_core::core::signature::Signature;
use sat_core::core::term_bank::TermBank;
use sat_core::error::TerminationReason;
use sat_core::heuristic::hcb::{Hcb, PriorityQueue, ScheduleStep};
use sat_core::heuristic::weights::StandardWeight;
use sat_core::saturation::main_loop::{run, ResourceLimits};
use sat_core::saturation::proof_state::ProofState;

fn fresh_hcb() -> Hcb {
  Hcb::new(vec![PriorityQueue::new(Box::new(StandardWeight))], vec![ScheduleStep { queue: 0, steps: 1 }])
}

/// `p(a)` asserted and its negation asserted: the empty clause must be derivable.
#[test]
fn ground_predicate_contradiction_is_unsatisfiable() {
  let mut signature = Signature::new();
  let mut bank = TermBank::new(sat_core::core::signature::reserved::TRUE);
  let boolean = signature.sorts.boolean();
  let individual = signature.sorts.individual();
  let p = signature.declare("p", 1, boolean, BitFlags::empty());
  let a = signature.declare("a", 0, individual, BitFlags::empty());
  let p_sym = signature.symbol(p).clone();
  let a_sym = signature.symbol(a).clone();
  let ta = bank.intern_term(&a_sym, SmallVec::new()).unwrap();
  let pa = bank.intern_term(&p_sym, SmallVec::from_vec(vec![ta])).unwrap();
  let true_term = bank.true_term();

  let precedence = Precedence::from_order([a, p]);
  let ordering: Box<dyn sat_core::core::ordering::Ordering> = Box::new(Lpo::new(precedence));
  let mut state = ProofState::new(signature, bank, ordering, fresh_hcb());

  let c1_id = state.fresh_clause_id();
  let c1 = Clause::new(c1_id, vec![Literal::new(pa.clone(), true_term.clone(), true)], None);
  state.add_axiom(c1);

  let c2_id = state.fresh_clause_id();
  let c2 = Clause::new(c2_id, vec![Literal::new(pa, true_term, false)], None);
  state.add_axiom(c2);

  let limits = ResourceLimits { max_steps: Some(100), interrupt: std::sync::Arc::new(std::sync::atomic::AtomicBool::new(false)) };
  let result = run(&mut state, &limits);
  let empty_id = result.expect("the contradictory pair must be refutable");
  let empty = state.clauses.get(empty_id).expect("the derived empty clause must remain in the clause set");
  assert!(empty.is_empty_clause());

  let proof = sat_core::proof::reconstruct(&state.clauses, empty_id).expect("a proof DAG must be reconstructible");
  let used = sat_core::proof::axioms_used(&proof, &state.clauses);
  assert!(used.contains(&c1_id));
  assert!(used.contains(&c2_id));
}

/// A single unconstrained unit clause `p(X)` has no contradiction to find; the loop must report
/// `Satisfiable` once `unprocessed` empties.
#[test]
fn lone_unconstrained_clause_is_satisfiable() {
  let mut signature = Signature::new();
  let mut bank = TermBank::new(sat_core::core::signature::reserved::TRUE);
  let boolean = signature.sorts.boolean();
  let individual = signature.sorts.individual();
  let p = signature.declare("p", 1, boolean, BitFlags::empty());
  let p_sym = signature.symbol(p).clone();
  let x = bank.intern_variable(individual, Some(0));
  let px = bank.intern_term(&p_sym, SmallVec::from_vec(vec![x])).unwrap();
  let true_term = bank.true_term();

  let ordering: Box<dyn sat_core::core::ordering::Ordering> = Box::new(Lpo::new(Precedence::new()));
  let mut state = ProofState::new(signature, bank, ordering, fresh_hcb());

  let id = state.fresh_clause_id();
  let clause = Clause::new(id, vec![Literal::new(px, true_term, true)], None);
  state.add_axiom(clause);

  let limits = ResourceLimits::unbounded();
  let result = run(&mut state, &limits);
  assert_eq!(result, Err(TerminationReason::Satisfiable));
}

/// `f(X) = X` plus `f(f(a)) != a`: demodulation must rewrite `f(f(a))` down to `a` in two
/// applications of the same unit equation, leaving the trivial (hence tautologous-negation)
/// contradiction `a != a`.
#[test]
fn demodulation_applies_the_same_equation_twice() {
  let mut signature = Signature::new();
  let mut bank = TermBank::new(sat_core::core::signature::reserved::TRUE);
  let individual = signature.sorts.individual();
  let f = signature.declare("f", 1, individual, BitFlags::empty());
  let a = signature.declare("a", 0, individual, BitFlags::empty());
  let f_sym = signature.symbol(f).clone();
  let a_sym = signature.symbol(a).clone();

  let x = bank.intern_variable(individual, Some(0));
  let fx = bank.intern_term(&f_sym, SmallVec::from_vec(vec![x.clone()])).unwrap();
  let ta = bank.intern_term(&a_sym, SmallVec::new()).unwrap();
  let faa = bank.intern_term(&f_sym, SmallVec::from_vec(vec![ta.clone()])).unwrap();
  let ffaa = bank.intern_term(&f_sym, SmallVec::from_vec(vec![faa])).unwrap();

  let precedence = Precedence::from_order([a, f]);
  let ordering: Box<dyn sat_core::core::ordering::Ordering> = Box::new(Lpo::new(precedence));
  let mut state = ProofState::new(signature, bank, ordering, fresh_hcb());

  // e1: f(X) = X
  let e1_id = state.fresh_clause_id();
  let e1 = Clause::new(e1_id, vec![Literal::new(fx, x, true)], None);
  state.add_axiom(e1);

  // c: f(f(a)) != a
  let c_id = state.fresh_clause_id();
  let c = Clause::new(c_id, vec![Literal::new(ffaa, ta, false)], None);
  state.add_axiom(c);

  let limits = ResourceLimits { max_steps: Some(200), interrupt: std::sync::Arc::new(std::sync::atomic::AtomicBool::new(false)) };
  let result = run(&mut state, &limits);
  let empty_id = result.expect("f(f(a)) must demodulate down to a, contradicting f(f(a)) != a");
  assert!(state.clauses.get(empty_id).unwrap().is_empty_clause());
}

/// Group axioms (`e*x=x`, `i(x)*x=e`, `(x*y)*z=x*(y*z)`) over a structure asserted commutative
/// fail to entail `a*b = b*a` is false — i.e. plain group theory alone cannot refute
/// non-commutativity, so instead this scenario asserts a commutative group and the conjecture
/// `a*b != b*a`, which must be refutable.
#[test]
fn commutative_group_refutes_noncommutativity_conjecture() {
  let mut signature = Signature::new();
  let mut bank = TermBank::new(sat_core::core::signature::reserved::TRUE);
  let individual = signature.sorts.individual();
  let mul = signature.declare("mul", 2, individual, BitFlags::empty());
  let inv = signature.declare("inv", 1, individual, BitFlags::empty());
  let e = signature.declare("e", 0, individual, BitFlags::empty());
  let a = signature.declare("a", 0, individual, BitFlags::empty());
  let b = signature.declare("b", 0, individual, BitFlags::empty());
  let mul_sym = signature.symbol(mul).clone();
  let inv_sym = signature.symbol(inv).clone();
  let e_sym = signature.symbol(e).clone();
  let a_sym = signature.symbol(a).clone();
  let b_sym = signature.symbol(b).clone();

  let te = bank.intern_term(&e_sym, SmallVec::new()).unwrap();
  let ta = bank.intern_term(&a_sym, SmallVec::new()).unwrap();
  let tb = bank.intern_term(&b_sym, SmallVec::new()).unwrap();

  let x0 = bank.intern_variable(individual, Some(0));
  let y0 = bank.intern_variable(individual, Some(1));
  let z0 = bank.intern_variable(individual, Some(2));

  // e * x = x
  let e_mul_x = bank.intern_term(&mul_sym, SmallVec::from_vec(vec![te.clone(), x0.clone()])).unwrap();
  // i(x) * x = e
  let inv_x = bank.intern_term(&inv_sym, SmallVec::from_vec(vec![x0.clone()])).unwrap();
  let invx_mul_x = bank.intern_term(&mul_sym, SmallVec::from_vec(vec![inv_x, x0.clone()])).unwrap();
  // (x*y)*z = x*(y*z)
  let xy = bank.intern_term(&mul_sym, SmallVec::from_vec(vec![x0.clone(), y0.clone()])).unwrap();
  let xy_z = bank.intern_term(&mul_sym, SmallVec::from_vec(vec![xy, z0.clone()])).unwrap();
  let yz = bank.intern_term(&mul_sym, SmallVec::from_vec(vec![y0.clone(), z0.clone()])).unwrap();
  let x_yz = bank.intern_term(&mul_sym, SmallVec::from_vec(vec![x0.clone(), yz])).unwrap();
  // x * y = y * x (commutativity)
  let x1 = bank.intern_variable(individual, Some(3));
  let y1 = bank.intern_variable(individual, Some(4));
  let xy2 = bank.intern_term(&mul_sym, SmallVec::from_vec(vec![x1.clone(), y1.clone()])).unwrap();
  let yx2 = bank.intern_term(&mul_sym, SmallVec::from_vec(vec![y1, x1])).unwrap();
  // a * b != b * a (negated conjecture)
  let ab = bank.intern_term(&mul_sym, SmallVec::from_vec(vec![ta.clone(), tb.clone()])).unwrap();
  let ba = bank.intern_term(&mul_sym, SmallVec::from_vec(vec![tb, ta])).unwrap();

  let precedence = Precedence::from_order([e, a, b, inv, mul]);
  let ordering: Box<dyn sat_core::core::ordering::Ordering> = Box::new(Lpo::new(precedence));
  let mut state = ProofState::new(signature, bank, ordering, fresh_hcb());

  for literals in [vec![(e_mul_x, x0)], vec![(invx_mul_x, te)], vec![(xy_z, x_yz)], vec![(xy2, yx2)]] {
    let id = state.fresh_clause_id();
    let clause = Clause::new(id, literals.into_iter().map(|(l, r)| Literal::new(l, r, true)).collect(), None);
    state.add_axiom(clause);
  }
  let conjecture_id = state.fresh_clause_id();
  let conjecture = Clause::new(conjecture_id, vec![Literal::new(ab, ba, false)], None);
  state.add_axiom(conjecture);

  let limits = ResourceLimits { max_steps: Some(2000), interrupt: std::sync::Arc::new(std::sync::atomic::AtomicBool::new(false)) };
  let result = run(&mut state, &limits);
  assert!(result.is_ok(), "commutativity directly contradicts a*b != b*a");
}

/// `p(X) | q(X)`, `~p(a)`, `~q(a)`: resolving the first two leaves `q(a)`, which resolves against
/// `~q(a)` into the empty clause, the remaining unit clauses disappearing by subsumption along the
/// way.
#[test]
fn disjunction_resolves_against_two_unit_negations() {
  let mut signature = Signature::new();
  let mut bank = TermBank::new(sat_core::core::signature::reserved::TRUE);
  let boolean = signature.sorts.boolean();
  let individual = signature.sorts.individual();
  let p = signature.declare("p", 1, boolean, BitFlags::empty());
  let q = signature.declare("q", 1, boolean, BitFlags::empty());
  let a = signature.declare("a", 0, individual, BitFlags::empty());
  let p_sym = signature.symbol(p).clone();
  let q_sym = signature.symbol(q).clone();
  let a_sym = signature.symbol(a).clone();
  let true_term = bank.true_term();

  let x = bank.intern_variable(individual, Some(0));
  let px = bank.intern_term(&p_sym, SmallVec::from_vec(vec![x.clone()])).unwrap();
  let qx = bank.intern_term(&q_sym, SmallVec::from_vec(vec![x])).unwrap();
  let ta = bank.intern_term(&a_sym, SmallVec::new()).unwrap();
  let pa = bank.intern_term(&p_sym, SmallVec::from_vec(vec![ta.clone()])).unwrap();
  let qa = bank.intern_term(&q_sym, SmallVec::from_vec(vec![ta])).unwrap();

  let precedence = Precedence::from_order([a, p, q]);
  let ordering: Box<dyn sat_core::core::ordering::Ordering> = Box::new(Lpo::new(precedence));
  let mut state = ProofState::new(signature, bank, ordering, fresh_hcb());

  let c1_id = state.fresh_clause_id();
  let c1 = Clause::new(c1_id, vec![Literal::new(px, true_term.clone(), true), Literal::new(qx, true_term.clone(), true)], None);
  state.add_axiom(c1);
  let c2_id = state.fresh_clause_id();
  let c2 = Clause::new(c2_id, vec![Literal::new(pa, true_term.clone(), false)], None);
  state.add_axiom(c2);
  let c3_id = state.fresh_clause_id();
  let c3 = Clause::new(c3_id, vec![Literal::new(qa, true_term, false)], None);
  state.add_axiom(c3);

  let limits = ResourceLimits { max_steps: Some(200), interrupt: std::sync::Arc::new(std::sync::atomic::AtomicBool::new(false)) };
  let result = run(&mut state, &limits);
  let empty_id = result.expect("p(X)|q(X) with both units negated must refute");
  assert!(state.clauses.get(empty_id).unwrap().is_empty_clause());
}

/// `f(a) = b`, `f(a) = c`, and the conjecture `b != c`: paramodulating the second equation into
/// the first derives `b = c`, which equality-resolves directly against the negated conjecture.
#[test]
fn paramodulation_then_equality_resolution_refutes_conjecture() {
  let mut signature = Signature::new();
  let mut bank = TermBank::new(sat_core::core::signature::reserved::TRUE);
  let individual = signature.sorts.individual();
  let f = signature.declare("f", 1, individual, BitFlags::empty());
  let a = signature.declare("a", 0, individual, BitFlags::empty());
  let b = signature.declare("b", 0, individual, BitFlags::empty());
  let c = signature.declare("c", 0, individual, BitFlags::empty());
  let f_sym = signature.symbol(f).clone();
  let a_sym = signature.symbol(a).clone();
  let b_sym = signature.symbol(b).clone();
  let c_sym = signature.symbol(c).clone();

  let ta = bank.intern_term(&a_sym, SmallVec::new()).unwrap();
  let tb = bank.intern_term(&b_sym, SmallVec::new()).unwrap();
  let tc = bank.intern_term(&c_sym, SmallVec::new()).unwrap();
  let fa = bank.intern_term(&f_sym, SmallVec::from_vec(vec![ta.clone()])).unwrap();
  let fa2 = bank.intern_term(&f_sym, SmallVec::from_vec(vec![ta])).unwrap();

  let precedence = Precedence::from_order([b, c, a, f]);
  let ordering: Box<dyn sat_core::core::ordering::Ordering> = Box::new(Lpo::new(precedence));
  let mut state = ProofState::new(signature, bank, ordering, fresh_hcb());

  let e1_id = state.fresh_clause_id();
  let e1 = Clause::new(e1_id, vec![Literal::new(fa, tb.clone(), true)], None);
  state.add_axiom(e1);
  let e2_id = state.fresh_clause_id();
  let e2 = Clause::new(e2_id, vec![Literal::new(fa2, tc.clone(), true)], None);
  state.add_axiom(e2);
  let conjecture_id = state.fresh_clause_id();
  let conjecture = Clause::new(conjecture_id, vec![Literal::new(tb, tc, false)], None);
  state.add_axiom(conjecture);

  let limits = ResourceLimits { max_steps: Some(200), interrupt: std::sync::Arc::new(std::sync::atomic::AtomicBool::new(false)) };
  let result = run(&mut state, &limits);
  let empty_id = result.expect("f(a)=b, f(a)=c, b!=c must refute via paramodulation and equality resolution");
  assert!(state.clauses.get(empty_id).unwrap().is_empty_clause());
}

/// Running the same unsatisfiable problem twice from freshly built, identically constructed
/// states must derive the empty clause in the same number of loop steps both times (spec §8's
/// determinism property — evaluation ties break by ascending clause ident, so nothing in the loop
/// depends on iteration order over a hash set).
#[test]
fn saturation_is_deterministic_across_runs() {
  fn build_and_run() -> (ClauseId, u64) {
    let mut signature = Signature::new();
    let mut bank = TermBank::new(sat_core::core::signature::reserved::TRUE);
    let boolean = signature.sorts.boolean();
    let individual = signature.sorts.individual();
    let p = signature.declare("p", 1, boolean, BitFlags::empty());
    let q = signature.declare("q", 1, boolean, BitFlags::empty());
    let a = signature.declare("a", 0, individual, BitFlags::empty());
    let p_sym = signature.symbol(p).clone();
    let q_sym = signature.symbol(q).clone();
    let a_sym = signature.symbol(a).clone();
    let true_term = bank.true_term();

    let x = bank.intern_variable(individual, Some(0));
    let px = bank.intern_term(&p_sym, SmallVec::from_vec(vec![x.clone()])).unwrap();
    let qx = bank.intern_term(&q_sym, SmallVec::from_vec(vec![x])).unwrap();
    let ta = bank.intern_term(&a_sym, SmallVec::new()).unwrap();
    let pa = bank.intern_term(&p_sym, SmallVec::from_vec(vec![ta.clone()])).unwrap();
    let qa = bank.intern_term(&q_sym, SmallVec::from_vec(vec![ta])).unwrap();

    let precedence = Precedence::from_order([a, p, q]);
    let ordering: Box<dyn sat_core::core::ordering::Ordering> = Box::new(Lpo::new(precedence));
    let mut state = ProofState::new(signature, bank, ordering, fresh_hcb());

    let c1_id = state.fresh_clause_id();
    let c1 = Clause::new(c1_id, vec![Literal::new(px, true_term.clone(), true), Literal::new(qx, true_term.clone(), true)], None);
    state.add_axiom(c1);
    let c2_id = state.fresh_clause_id();
    let c2 = Clause::new(c2_id, vec![Literal::new(pa, true_term.clone(), false)], None);
    state.add_axiom(c2);
    let c3_id = state.fresh_clause_id();
    let c3 = Clause::new(c3_id, vec![Literal::new(qa, true_term, false)], None);
    state.add_axiom(c3);

    let limits = ResourceLimits { max_steps: Some(200), interrupt: std::sync::Arc::new(std::sync::atomic::AtomicBool::new(false)) };
    let empty_id = run(&mut state, &limits).expect("deterministic scenario must refute");
    (empty_id, state.step_counter)
  }

  let (first_id, first_steps) = build_and_run();
  let (second_id, second_steps) = build_and_run();
  assert_eq!(first_id, second_id);
  assert_eq!(first_steps, second_steps);
}
