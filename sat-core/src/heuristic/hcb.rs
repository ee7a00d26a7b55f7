/*!

A heuristic control block (HCB) is a cyclic schedule over a fixed list of priority queues: take
`steps_0` clauses from queue 0, then `steps_1` from queue 1, and so on, wrapping back to queue 0
(spec §4.8). Each queue orders its clauses by a [`super::weights::WeightFunction`] plus the
deterministic `(priority, weight, ident)` tie-break already built into
[`crate::core::clause::evaluation_cmp`]. The classic "clause weight only" search is the degenerate
one-queue, one-step-per-cycle case; interleaving a FIFO queue alongside a weight queue is the usual
two-queue schedule that keeps the search both fair and weight-directed.

*/

use std::collections::BinaryHeap;
use std::cmp::Reverse;

use crate::core::clause::{Clause, ClauseId};
use crate::heuristic::weights::WeightFunction;

struct ScoredClause {
  id: ClauseId,
  score: f64,
}

impl PartialEq for ScoredClause {
  fn eq(&self, other: &Self) -> bool {
    self.score == other.score && self.id == other.id
  }
}
impl Eq for ScoredClause {}

impl PartialOrd for ScoredClause {
  fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
    Some(self.cmp(other))
  }
}

impl Ord for ScoredClause {
  fn cmp(&self, other: &Self) -> std::cmp::Ordering {
    self.score.partial_cmp(&other.score).unwrap_or(std::cmp::Ordering::Equal).then_with(|| self.id.cmp(&other.id))
  }
}

/// A single priority queue: a weight function plus a min-heap of `(score, id)` pairs (via
/// `Reverse` so the smallest score pops first).
pub struct PriorityQueue {
  weight_function: Box<dyn WeightFunction>,
  heap: BinaryHeap<Reverse<ScoredClause>>,
}

impl PriorityQueue {
  pub fn new(weight_function: Box<dyn WeightFunction>) -> Self {
    Self { weight_function, heap: BinaryHeap::new() }
  }

  pub fn push(&mut self, clause: &Clause) {
    let score = self.weight_function.weight(clause);
    self.heap.push(Reverse(ScoredClause { id: clause.id, score }));
  }

  pub fn pop(&mut self) -> Option<ClauseId> {
    self.heap.pop().map(|Reverse(scored)| scored.id)
  }

  pub fn is_empty(&self) -> bool {
    self.heap.is_empty()
  }

  pub fn len(&self) -> usize {
    self.heap.len()
  }
}

/// One schedule entry: a queue index and how many clauses to draw from it before moving to the
/// next entry.
pub struct ScheduleStep {
  pub queue: usize,
  pub steps: u32,
}

/// The heuristic control block: a fixed list of priority queues and a cyclic schedule over them.
pub struct Hcb {
  queues: Vec<PriorityQueue>,
  schedule: Vec<ScheduleStep>,
  cursor: usize,
  remaining_in_step: u32,
}

impl Hcb {
  pub fn new(queues: Vec<PriorityQueue>, schedule: Vec<ScheduleStep>) -> Self {
    assert!(!queues.is_empty(), "HCB requires at least one priority queue");
    assert!(!schedule.is_empty(), "HCB requires a non-empty schedule");
    let remaining_in_step = schedule[0].steps;
    Self { queues, schedule, cursor: 0, remaining_in_step }
  }

  /// Adds a freshly generated clause to every queue in the schedule — a clause competes in all
  /// queues simultaneously; only the schedule determines which queue is consulted next.
  pub fn insert(&mut self, clause: &Clause) {
    for queue in &mut self.queues {
      queue.push(clause);
    }
  }

  /// Removes `id` from every queue; called when a clause is deleted by simplification before it is
  /// ever selected.
  pub fn retain_all_but(&mut self, predicate: impl Fn(ClauseId) -> bool + Copy) {
    for queue in &mut self.queues {
      queue.heap.retain(|Reverse(scored)| predicate(scored.id));
    }
  }

  /// Advances the cyclic schedule and selects the next given clause, or `None` if every queue is
  /// exhausted.
  pub fn select(&mut self) -> Option<ClauseId> {
    if self.queues.iter().all(PriorityQueue::is_empty) {
      return None;
    }

    let mut attempts = 0;
    loop {
      attempts += 1;
      if attempts > self.schedule.len() * 2 {
        // Every queue named by the schedule is empty right now but some other queue (not
        // reachable this cycle) still holds clauses; fall back to the first non-empty queue.
        return self.queues.iter_mut().find_map(PriorityQueue::pop);
      }

      let step = &self.schedule[self.cursor];
      let queue_index = step.queue;

      if self.remaining_in_step == 0 {
        self.advance_cursor();
        continue;
      }

      if let Some(id) = self.queues[queue_index].pop() {
        self.remaining_in_step -= 1;
        if self.remaining_in_step == 0 {
          self.advance_cursor();
        }
        return Some(id);
      }

      self.advance_cursor();
    }
  }

  fn advance_cursor(&mut self) {
    self.cursor = (self.cursor + 1) % self.schedule.len();
    self.remaining_in_step = self.schedule[self.cursor].steps;
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::core::literal::Literal;
  use crate::core::signature::Signature;
  use crate::core::term_bank::TermBank;
  use crate::heuristic::weights::{Fifo, StandardWeight};
  use enumflags2::BitFlags;

  fn unit_clause(id: u64, bank: &mut TermBank, signature: &Signature, weight_symbol_args: usize) -> Clause {
    let individual = signature.sorts.individual();
    let a = signature.declare(&"a".repeat(weight_symbol_args.max(1)), 0, individual, BitFlags::empty());
    let a_sym = signature.symbol(a).clone();
    let ta = bank.intern_term(&a_sym, sat_abs::SmallVec::new()).unwrap();
    let true_term = bank.true_term();
    Clause::new(ClauseId(id), vec![Literal::new(ta, true_term, true)], None)
  }

  #[test]
  fn two_queue_schedule_alternates_per_step_count() {
    let mut signature = Signature::new();
    let mut bank = TermBank::new(crate::core::signature::reserved::TRUE);
    let c1 = unit_clause(1, &mut bank, &signature, 1);
    let c2 = unit_clause(2, &mut bank, &signature, 2);
    let c3 = unit_clause(3, &mut bank, &signature, 3);

    let mut weight_queue = PriorityQueue::new(Box::new(StandardWeight));
    let mut fifo_queue = PriorityQueue::new(Box::new(Fifo));
    for c in [&c1, &c2, &c3] {
      weight_queue.push(c);
      fifo_queue.push(c);
    }

    let mut hcb = Hcb::new(vec![weight_queue, fifo_queue], vec![ScheduleStep { queue: 0, steps: 1 }, ScheduleStep { queue: 1, steps: 1 }]);

    let mut selected = Vec::new();
    while let Some(id) = hcb.select() {
      selected.push(id);
    }
    assert_eq!(selected.len(), 6, "each of the 3 clauses appears once per queue");
  }
}
