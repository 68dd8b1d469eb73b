//! # Timer List Scenarios
//!
//! End-to-end behavior of the sorted timer list through its public API,
//! exercised the way a server's connection layer would drive it.

#[cfg(test)]
mod tests {
    use conn_timeout::{TimerList, Timestamp};

    type FireLog = Vec<(u32, u64)>;
    type List = TimerList<u32, FireLog>;

    fn ts(secs: u64) -> Timestamp {
        Timestamp::new(secs)
    }

    /// Insert a timer whose callback appends (tag, firing deadline) to the log.
    fn insert_logged(list: &mut List, expiry: u64, tag: u32) -> conn_timeout::TimerKey {
        list.insert(
            ts(expiry),
            Box::new(move |_timers, log, payload| log.push((*payload, expiry))),
            tag,
        )
    }

    fn deadlines(list: &List) -> Vec<u64> {
        list.deadlines().iter().map(|d| d.as_secs()).collect()
    }

    // =========================================================================
    // TEST GROUP 1: Ordered insertion with stable ties
    // =========================================================================

    #[test]
    fn test_out_of_order_inserts_keep_list_sorted() {
        let mut list = List::new();
        insert_logged(&mut list, 5, 1);
        insert_logged(&mut list, 2, 2);
        insert_logged(&mut list, 8, 3);
        insert_logged(&mut list, 2, 4);

        assert_eq!(deadlines(&list), vec![2, 2, 5, 8]);

        // Equal deadlines fire in insertion order.
        let mut log = FireLog::new();
        assert_eq!(list.sweep(ts(100), &mut log), 4);
        assert_eq!(log, vec![(2, 2), (4, 2), (1, 5), (3, 8)]);
    }

    // =========================================================================
    // TEST GROUP 2: Deadline extension
    // =========================================================================

    #[test]
    fn test_extension_moves_timer_past_unchanged_neighbors() {
        let mut list = List::new();
        let key = insert_logged(&mut list, 2, 1);
        insert_logged(&mut list, 5, 2);
        insert_logged(&mut list, 8, 3);

        assert!(list.reposition(key, ts(6)));
        assert_eq!(deadlines(&list), vec![5, 6, 8]);

        // The moved timer still fires, once, at its new place.
        let mut log = FireLog::new();
        list.sweep(ts(100), &mut log);
        assert_eq!(log.iter().map(|(tag, _)| *tag).collect::<Vec<_>>(), vec![2, 1, 3]);
    }

    #[test]
    fn test_extension_of_sole_timer_stays_in_place() {
        let mut list = List::new();
        let key = insert_logged(&mut list, 10, 1);

        assert!(list.reposition(key, ts(30)));
        assert_eq!(list.next_deadline(), Some(ts(30)));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_decreased_deadline_falls_back_to_reinsertion() {
        let mut list = List::new();
        insert_logged(&mut list, 3, 1);
        insert_logged(&mut list, 7, 2);
        let key = insert_logged(&mut list, 9, 3);

        assert!(list.reposition(key, ts(5)));
        assert_eq!(deadlines(&list), vec![3, 5, 7]);

        // The key survives the fallback path.
        assert!(list.contains(key));
        assert!(list.remove(key));
        assert_eq!(deadlines(&list), vec![3, 7]);
    }

    // =========================================================================
    // TEST GROUP 3: Expiry sweep
    // =========================================================================

    #[test]
    fn test_sweep_fires_due_prefix_in_order() {
        let mut list = List::new();
        insert_logged(&mut list, 2, 1);
        insert_logged(&mut list, 5, 2);
        insert_logged(&mut list, 8, 3);

        let mut log = FireLog::new();
        assert_eq!(list.sweep(ts(5), &mut log), 2);
        assert_eq!(log, vec![(1, 2), (2, 5)]);
        assert_eq!(deadlines(&list), vec![8]);

        // Nothing else is due; the survivor fires on a later sweep.
        assert_eq!(list.sweep(ts(5), &mut log), 0);
        assert_eq!(list.sweep(ts(8), &mut log), 1);
        assert!(list.is_empty());
    }

    #[test]
    fn test_sweep_on_empty_list_is_noop() {
        let mut list = List::new();
        let mut log = FireLog::new();
        assert_eq!(list.sweep(ts(1_000), &mut log), 0);
        assert!(log.is_empty());
    }

    #[test]
    fn test_callback_may_insert_during_sweep() {
        let mut list: TimerList<u32, Vec<u32>> = TimerList::new();
        list.insert(
            ts(2),
            Box::new(|timers, log, _payload| {
                log.push(1);
                // A due insertion fires within the same sweep; a future one
                // survives it.
                timers.insert(ts(3), Box::new(|_, log, _| log.push(2)), 2);
                timers.insert(ts(50), Box::new(|_, log, _| log.push(3)), 3);
            }),
            1,
        );

        let mut log = Vec::new();
        assert_eq!(list.sweep(ts(10), &mut log), 2);
        assert_eq!(log, vec![1, 2]);
        assert_eq!(list.len(), 1);
    }

    // =========================================================================
    // TEST GROUP 4: Removal
    // =========================================================================

    #[test]
    fn test_remove_middle_timer_keeps_neighbors_linked() {
        let mut list = List::new();
        insert_logged(&mut list, 2, 1);
        let mid = insert_logged(&mut list, 5, 2);
        insert_logged(&mut list, 8, 3);

        assert!(list.remove(mid));
        assert_eq!(deadlines(&list), vec![2, 8]);

        // Removing again with the stale key changes nothing.
        assert!(!list.remove(mid));
        assert!(!list.reposition(mid, ts(100)));
        assert_eq!(deadlines(&list), vec![2, 8]);
    }

    #[test]
    fn test_fired_timer_key_goes_stale() {
        let mut list = List::new();
        let key = insert_logged(&mut list, 2, 1);

        let mut log = FireLog::new();
        assert_eq!(list.sweep(ts(2), &mut log), 1);
        assert!(!list.contains(key));
        assert!(!list.remove(key));
    }

    // =========================================================================
    // TEST GROUP 5: Teardown
    // =========================================================================

    #[test]
    fn test_clear_discards_pending_timers_without_firing() {
        let mut list = List::new();
        for deadline in [4, 1, 9] {
            insert_logged(&mut list, deadline, deadline as u32);
        }

        list.clear();
        assert!(list.is_empty());

        let mut log = FireLog::new();
        assert_eq!(list.sweep(ts(1_000), &mut log), 0);
        assert!(log.is_empty());
    }
}
