use std::collections::{HashSet, VecDeque};

/// Bounded set of already-processed article urls. Insertion order is
/// tracked so eviction drops the oldest entries first and the most
/// recently seen urls always survive.
#[derive(Debug)]
pub struct SeenUrls {
    set: HashSet<String>,
    order: VecDeque<String>,
    cap: usize,
}

impl SeenUrls {
    pub fn new(cap: usize) -> Self {
        Self {
            set: HashSet::new(),
            order: VecDeque::new(),
            cap,
        }
    }

    pub fn contains(&self, url: &str) -> bool {
        self.set.contains(url)
    }

    pub fn insert(&mut self, url: &str) {
        if self.set.insert(url.to_string()) {
            self.order.push_back(url.to_string());
        }
    }

    /// Evict oldest entries until the set fits the cap again.
    pub fn enforce_cap(&mut self) {
        while self.order.len() > self.cap {
            if let Some(oldest) = self.order.pop_front() {
                self.set.remove(&oldest);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.set.len()
    }

    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }
}
