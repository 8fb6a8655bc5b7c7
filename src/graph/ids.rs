/// Source of fresh node ids.
///
/// Generators are handed to the expander and the editor explicitly, so a test can
/// pin ids down and a session can keep one counter across expansion and edits.
/// Ids that clash with a node already in the graph are drawn again.
pub trait IdGenerator {
    fn next_id(&mut self) -> String;
}

impl<F> IdGenerator for F
where
    F: FnMut() -> String,
{
    fn next_id(&mut self) -> String {
        self()
    }
}

/// Draws an id that `taken` does not reject.
///
/// Redraws up to `taken_count` times, which is enough for any generator that does not
/// repeat itself; a generator that does gets its last id suffixed with `_1`, `_2`, ...
pub(crate) fn fresh_id<G, F>(ids: &mut G, taken_count: usize, taken: F) -> String
where
    G: IdGenerator + ?Sized,
    F: Fn(&str) -> bool,
{
    let mut candidate = ids.next_id();
    for _ in 0..taken_count {
        if !taken(&candidate) {
            return candidate;
        }
        candidate = ids.next_id();
    }

    let mut id = candidate.clone();
    let mut suffix = 1;
    while taken(&id) {
        id = format!("{}_{}", candidate, suffix);
        suffix += 1;
    }
    id
}

/// Monotonic `prefix` + counter ids. Ids handed out are never handed out again.
#[derive(Debug, Clone)]
pub struct SequentialIds {
    prefix: String,
    next: u64,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::with_prefix("node_")
    }

    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 0,
        }
    }

    /// Skips the counter ahead, e.g. past ids already present in a loaded graph.
    pub fn starting_at(mut self, next: u64) -> Self {
        self.next = next;
        self
    }

    /// Moves the counter past every id in `taken` that this generator could have produced.
    pub fn resume_after<'a>(mut self, taken: impl IntoIterator<Item = &'a str>) -> Self {
        let highest = taken
            .into_iter()
            .filter_map(|id| id.strip_prefix(self.prefix.as_str()))
            .filter_map(|n| n.parse::<u64>().ok())
            .max();
        if let Some(highest) = highest {
            self.next = self.next.max(highest.saturating_add(1));
        }
        self
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> String {
        let id = format!("{}{}", self.prefix, self.next);
        self.next += 1;
        id
    }
}

/// Random 64-bit hex ids, for sessions that mix graphs from several sources.
#[cfg(feature = "random-ids")]
#[derive(Debug, Clone, Default)]
pub struct RandomIds;

#[cfg(feature = "random-ids")]
impl IdGenerator for RandomIds {
    fn next_id(&mut self) -> String {
        use rand::Rng;
        format!("node_{:016x}", rand::rng().random::<u64>())
    }
}
