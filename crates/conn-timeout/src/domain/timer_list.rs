//! # Sorted Timer List
//!
//! The core of the subsystem: a doubly linked list of pending timers kept in
//! ascending order of absolute expiry, so that one bounded sweep from the
//! head finds every expired timer without scanning the rest.
//!
//! ## Representation
//!
//! Records live in an arena (a slot pool with an embedded free list) and the
//! `prev`/`next` links are slot indices, which keeps the O(1) splice of an
//! intrusive list without raw pointers. Keys handed to callers are
//! generational ([`TimerKey`]), so a key is invalidated the instant its
//! record fires or is removed and any later use of it is a silent no-op.
//!
//! ## Ordering
//!
//! For every non-tail record, `record.expiry <= successor.expiry`. Timers
//! with equal expiry keep their insertion order: a new timer is spliced
//! before the first strictly later record, which places it after every
//! existing equal-or-earlier one.
//!
//! ## Single-threaded by construction
//!
//! Every operation takes `&mut self` and runs to completion on the caller's
//! thread. The list provides no locking; a host driving it from several
//! tasks must serialize access itself.

use std::fmt;

use crate::domain::Timestamp;

// =============================================================================
// KEYS AND CALLBACKS
// =============================================================================

/// Opaque generational key for a linked timer record.
///
/// Valid from `insert` until the record fires during a sweep or is removed;
/// after that, every operation taking the key is a no-op. Repositioning does
/// not invalidate a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerKey {
    index: usize,
    generation: u64,
}

/// Per-timer expiry callback.
///
/// Invoked synchronously during [`TimerList::sweep`], after the firing
/// record has already been destroyed. The callback receives the list itself
/// and may `insert`, `remove`, or `reposition` other timers reentrantly;
/// re-entering `sweep` is unrepresentable because the list is exclusively
/// borrowed for the duration of the sweep.
///
/// `C` is the sweep context the caller threads through every callback, and
/// `T` is the payload token identifying the externally owned connection
/// data the timer belongs to.
pub type ExpiryCallback<T, C> = Box<dyn FnMut(&mut TimerList<T, C>, &mut C, &T) + Send>;

// =============================================================================
// RECORDS AND SLOTS
// =============================================================================

/// One pending expiration: absolute deadline, callback, payload token, and
/// the intrusive links owned by the containing list.
struct TimerRecord<T, C> {
    expiry: Timestamp,
    callback: ExpiryCallback<T, C>,
    payload: T,
    prev: Option<usize>,
    next: Option<usize>,
}

enum SlotState<T, C> {
    Occupied(TimerRecord<T, C>),
    Free { next_free: Option<usize> },
}

struct Slot<T, C> {
    /// Bumped on every free; stale keys fail the generation check.
    generation: u64,
    state: SlotState<T, C>,
}

// =============================================================================
// TIMER LIST
// =============================================================================

/// Ordered collection of pending timers, ascending by expiry.
///
/// Owns every linked record: a record is destroyed exactly once, either when
/// it fires during a sweep, when it is explicitly removed, or when the list
/// itself is dropped. Payloads referenced by `T` are owned elsewhere and
/// never touched on destruction.
pub struct TimerList<T, C> {
    slots: Vec<Slot<T, C>>,
    free_head: Option<usize>,
    /// Earliest deadline.
    head: Option<usize>,
    /// Latest deadline.
    tail: Option<usize>,
    len: usize,
}

impl<T, C> TimerList<T, C> {
    /// Create an empty timer list.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_head: None,
            head: None,
            tail: None,
            len: 0,
        }
    }

    /// Number of linked timers.
    pub fn len(&self) -> usize {
        self.len
    }

    /// True if no timers are linked.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Earliest pending deadline, if any.
    pub fn next_deadline(&self) -> Option<Timestamp> {
        self.head.map(|index| self.record(index).expiry)
    }

    /// True if `key` still refers to a linked record.
    pub fn contains(&self, key: TimerKey) -> bool {
        self.resolve(key).is_some()
    }

    /// Deadline of the record behind `key`, if the key is still live.
    pub fn expiry_of(&self, key: TimerKey) -> Option<Timestamp> {
        self.resolve(key).map(|index| self.record(index).expiry)
    }

    /// Snapshot of all deadlines in list order (ascending).
    ///
    /// Diagnostic surface; the sweep never needs a full traversal.
    pub fn deadlines(&self) -> Vec<Timestamp> {
        let mut out = Vec::with_capacity(self.len);
        let mut cursor = self.head;
        while let Some(index) = cursor {
            let record = self.record(index);
            out.push(record.expiry);
            cursor = record.next;
        }
        out
    }

    // -------------------------------------------------------------------------
    // Insert
    // -------------------------------------------------------------------------

    /// Link a new timer with the given absolute deadline.
    ///
    /// Equal-expiry timers are placed after all existing equal-or-earlier
    /// ones, so insertion order is preserved among ties. O(n) worst case.
    pub fn insert(&mut self, expiry: Timestamp, callback: ExpiryCallback<T, C>, payload: T) -> TimerKey {
        let index = self.alloc(TimerRecord {
            expiry,
            callback,
            payload,
            prev: None,
            next: None,
        });
        self.link_sorted(index);
        self.len += 1;
        TimerKey {
            index,
            generation: self.slots[index].generation,
        }
    }

    // -------------------------------------------------------------------------
    // Reposition
    // -------------------------------------------------------------------------

    /// Move an already linked timer to a new deadline.
    ///
    /// The expected direction is a lengthened deadline (connection showed
    /// activity); that case is a bounded forward rescan from the timer's old
    /// successor, because only the moved timer can have broken the order and
    /// only toward the tail. A shortened deadline falls back to a full
    /// re-insert scan from the head; the key stays valid either way.
    ///
    /// Returns `false` (and does nothing) if the key is stale.
    pub fn reposition(&mut self, key: TimerKey, new_expiry: Timestamp) -> bool {
        let Some(index) = self.resolve(key) else {
            return false;
        };
        let old_expiry = self.record(index).expiry;
        self.record_mut(index).expiry = new_expiry;

        if new_expiry >= old_expiry {
            match self.record(index).next {
                // Already the latest deadline; nothing can be out of order.
                None => {}
                // Successor still not earlier: chain remains sorted.
                Some(next) if self.record(next).expiry >= new_expiry => {}
                Some(next) => {
                    self.unlink(index);
                    // `next` stays linked and its expiry is < new_expiry,
                    // so the scan precondition holds.
                    self.link_after_scan(index, next);
                }
            }
        } else {
            self.unlink(index);
            self.link_sorted(index);
        }
        true
    }

    // -------------------------------------------------------------------------
    // Remove
    // -------------------------------------------------------------------------

    /// Unlink and destroy a timer without firing it.
    ///
    /// Returns `false` (and does nothing) if the key is stale, which makes
    /// teardown races harmless: removing a timer that already fired is a
    /// no-op, not an error.
    pub fn remove(&mut self, key: TimerKey) -> bool {
        let Some(index) = self.resolve(key) else {
            return false;
        };
        self.unlink(index);
        self.free(index);
        self.len -= 1;
        true
    }

    /// Destroy every linked timer without firing any callback.
    pub fn clear(&mut self) {
        while let Some(head) = self.head {
            self.unlink(head);
            self.free(head);
            self.len -= 1;
        }
    }

    // -------------------------------------------------------------------------
    // Sweep
    // -------------------------------------------------------------------------

    /// Fire and destroy every timer with `expiry <= now`, earliest first.
    ///
    /// Because the list is sorted, the scan stops at the first unexpired
    /// timer: everything after it is unexpired too. Each firing record is
    /// destroyed *before* its callback runs, so a timer can never fire
    /// twice no matter what the callback does, and the loop re-reads the
    /// head on every iteration, honoring reentrant mutations made by
    /// callbacks. Returns the number of timers fired.
    pub fn sweep(&mut self, now: Timestamp, cx: &mut C) -> usize {
        let mut fired = 0;
        while let Some((mut callback, payload)) = self.pop_due(now) {
            callback(self, cx, &payload);
            fired += 1;
        }
        fired
    }

    /// Detach the head record if it is due, consuming it.
    fn pop_due(&mut self, now: Timestamp) -> Option<(ExpiryCallback<T, C>, T)> {
        let head = self.head?;
        if self.record(head).expiry > now {
            return None;
        }
        self.unlink(head);
        let record = self.free(head);
        self.len -= 1;
        Some((record.callback, record.payload))
    }

    // -------------------------------------------------------------------------
    // Chain splicing
    // -------------------------------------------------------------------------

    /// Splice an unlinked record into sorted position, scanning from head.
    fn link_sorted(&mut self, index: usize) {
        let expiry = self.record(index).expiry;
        match self.head {
            None => {
                self.head = Some(index);
                self.tail = Some(index);
            }
            Some(head) if expiry < self.record(head).expiry => {
                self.record_mut(index).next = Some(head);
                self.record_mut(head).prev = Some(index);
                self.head = Some(index);
            }
            Some(head) => self.link_after_scan(index, head),
        }
    }

    /// Splice an unlinked record somewhere at or after `start`.
    ///
    /// Precondition: `start` is linked and `start.expiry <= record.expiry`.
    /// Walks forward to the first strictly later record and splices before
    /// it; appends at the tail if none exists.
    fn link_after_scan(&mut self, index: usize, start: usize) {
        let expiry = self.record(index).expiry;
        let mut prev = start;
        let mut cursor = self.record(start).next;

        while let Some(current) = cursor {
            if expiry < self.record(current).expiry {
                self.record_mut(prev).next = Some(index);
                self.record_mut(current).prev = Some(index);
                let record = self.record_mut(index);
                record.prev = Some(prev);
                record.next = Some(current);
                return;
            }
            prev = current;
            cursor = self.record(current).next;
        }

        // Walked off the tail: append.
        self.record_mut(prev).next = Some(index);
        let record = self.record_mut(index);
        record.prev = Some(prev);
        record.next = None;
        self.tail = Some(index);
    }

    /// Detach a record from the chain, patching neighbors, head, and tail.
    ///
    /// Covers all four cases: sole element, head, tail, interior. The slot
    /// itself stays allocated; callers free or re-link it.
    fn unlink(&mut self, index: usize) {
        let (prev, next) = {
            let record = self.record(index);
            (record.prev, record.next)
        };
        match prev {
            Some(p) => self.record_mut(p).next = next,
            None => self.head = next,
        }
        match next {
            Some(n) => self.record_mut(n).prev = prev,
            None => self.tail = prev,
        }
        let record = self.record_mut(index);
        record.prev = None;
        record.next = None;
    }

    // -------------------------------------------------------------------------
    // Arena plumbing
    // -------------------------------------------------------------------------

    fn resolve(&self, key: TimerKey) -> Option<usize> {
        let slot = self.slots.get(key.index)?;
        if slot.generation == key.generation && matches!(&slot.state, SlotState::Occupied(_)) {
            Some(key.index)
        } else {
            None
        }
    }

    fn record(&self, index: usize) -> &TimerRecord<T, C> {
        match &self.slots[index].state {
            SlotState::Occupied(record) => record,
            SlotState::Free { .. } => unreachable!("linked index {index} points at a free slot"),
        }
    }

    fn record_mut(&mut self, index: usize) -> &mut TimerRecord<T, C> {
        match &mut self.slots[index].state {
            SlotState::Occupied(record) => record,
            SlotState::Free { .. } => unreachable!("linked index {index} points at a free slot"),
        }
    }

    fn alloc(&mut self, record: TimerRecord<T, C>) -> usize {
        match self.free_head {
            Some(index) => {
                let slot = &mut self.slots[index];
                let next_free = match &slot.state {
                    SlotState::Free { next_free } => *next_free,
                    SlotState::Occupied(_) => {
                        unreachable!("free list index {index} points at an occupied slot")
                    }
                };
                slot.state = SlotState::Occupied(record);
                self.free_head = next_free;
                index
            }
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    state: SlotState::Occupied(record),
                });
                self.slots.len() - 1
            }
        }
    }

    /// Free a slot, bumping its generation so existing keys go stale.
    fn free(&mut self, index: usize) -> TimerRecord<T, C> {
        let next_free = self.free_head;
        let slot = &mut self.slots[index];
        slot.generation = slot.generation.wrapping_add(1);
        let state = std::mem::replace(&mut slot.state, SlotState::Free { next_free });
        self.free_head = Some(index);
        match state {
            SlotState::Occupied(record) => record,
            SlotState::Free { .. } => unreachable!("double free of slot {index}"),
        }
    }
}

impl<T, C> Default for TimerList<T, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, C> fmt::Debug for TimerList<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimerList")
            .field("len", &self.len)
            .field("next_deadline", &self.next_deadline())
            .finish()
    }
}

// =============================================================================
// TESTS
// =============================================================================
