use crate::agent::Agent;

/// Pick the fronting agent among `candidates` (indices into `agents`).
///
/// Highest energy wins. On exact equality the candidate appearing first in
/// `candidates` wins, so with candidates collected in population order the
/// earliest-registered agent takes ties. Returns `None` when there are no
/// candidates.
pub fn arbitrate(agents: &[Agent], candidates: &[usize]) -> Option<usize> {
    let mut winner: Option<usize> = None;
    for &idx in candidates {
        match winner {
            Some(best) if agents[idx].energy <= agents[best].energy => {}
            _ => winner = Some(idx),
        }
    }
    winner
}
