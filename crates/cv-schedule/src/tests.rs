//! Unit tests for cv-schedule.

#[cfg(test)]
mod request {
    use cv_core::{RequestId, SimTime, TargetId};
    use crate::Request;

    fn req() -> Request {
        Request::new(RequestId(0), SimTime(10.0), TargetId(0), 8, 50.0)
    }

    #[test]
    fn deadline_and_slack() {
        let r = req();
        assert_eq!(r.deadline(), SimTime(60.0));
        assert_eq!(r.deferred_until(), SimTime(10.0));
        assert_eq!(r.slack(), 50.0);
        assert_eq!(r.window(SimTime(25.0)), 35.0);
        assert!(r.is_satisfiable());
    }

    #[test]
    fn deferral_is_monotonic_and_bounded() {
        let mut r = req();
        assert!(r.defer_to(SimTime(30.0)));
        assert_eq!(r.slack(), 30.0);
        assert!(!r.defer_to(SimTime(20.0)), "moving backwards must fail");
        assert_eq!(r.deferred_until(), SimTime(30.0));
        assert!(!r.defer_to(SimTime(60.0)), "deadline itself is too late");
        assert!(!r.defer_to(SimTime::INFINITY));
        assert_eq!(r.deferred_until(), SimTime(30.0));
        assert!(r.defer_to(SimTime(59.0)));
        assert!(r.is_satisfiable());
    }

    #[test]
    fn delivery_until_served() {
        let mut r = req();
        r.deliver(5);
        assert_eq!(r.remaining_goods, 3);
        assert!(!r.is_served());
        r.deliver(5);
        assert_eq!(r.remaining_goods, 0);
        assert!(r.is_served());
    }
}

#[cfg(test)]
mod request_queue {
    use cv_core::{RequestId, SimTime, TargetId};
    use crate::{Request, RequestQueue};

    fn req(id: u32, arrival: f64, timeout: f64) -> Request {
        Request::new(RequestId(id), SimTime(arrival), TargetId(0), 1, timeout)
    }

    #[test]
    fn empty() {
        let mut q = RequestQueue::new();
        assert!(q.is_empty());
        assert!(q.pop_batch().is_none());
        assert!(q.next_time().is_none());
    }

    #[test]
    fn batch_shares_min_time_and_sorts_by_slack() {
        let mut q: RequestQueue = [
            req(0, 5.0, 100.0),
            req(1, 5.0, 20.0),
            req(2, 9.0, 1.0),
            req(3, 5.0, 20.0),
        ]
        .into_iter()
        .collect();
        assert_eq!(q.len(), 4);
        assert_eq!(q.next_time(), Some(SimTime(5.0)));

        let (t, batch) = q.pop_batch().unwrap();
        assert_eq!(t, SimTime(5.0));
        let ids: Vec<_> = batch.iter().map(|r| r.id.0).collect();
        assert_eq!(ids, [1, 3, 0]);
        assert_eq!(q.len(), 1);
        assert_eq!(q.next_time(), Some(SimTime(9.0)));
    }

    #[test]
    fn deferred_request_requeues_later() {
        let mut q = RequestQueue::new();
        q.push(req(0, 0.0, 100.0));
        let (_, mut batch) = q.pop_batch().unwrap();
        let mut r = batch.pop().unwrap();
        assert!(r.defer_to(SimTime(40.0)));
        q.push(r);
        assert_eq!(q.next_time(), Some(SimTime(40.0)));
        let (t, batch) = q.pop_batch().unwrap();
        assert_eq!(t, SimTime(40.0));
        assert_eq!(batch[0].slack(), 60.0);
    }
}

#[cfg(test)]
mod timing {
    use cv_core::{CourierId, DepotId, SimTime};
    use crate::{ReturnQueue, SupplySchedule};

    #[test]
    fn returns_pop_in_time_then_push_order() {
        let mut q = ReturnQueue::new();
        q.push(SimTime(8.0), CourierId(0));
        q.push(SimTime(3.0), CourierId(1));
        q.push(SimTime(3.0), CourierId(2));
        q.push(SimTime(20.0), CourierId(3));

        let due = q.pop_due(SimTime(8.0));
        let ids: Vec<_> = due.iter().map(|(_, c)| c.0).collect();
        assert_eq!(ids, [1, 2, 0]);
        assert_eq!(q.next_time(), Some(SimTime(20.0)));
        assert!(q.pop_due(SimTime(19.9)).is_empty());

        let rest = q.drain_all();
        assert_eq!(rest, vec![(SimTime(20.0), CourierId(3))]);
        assert!(q.is_empty());
    }

    #[test]
    fn supply_ties_break_by_depot() {
        let mut s: SupplySchedule = [
            (SimTime(10.0), DepotId(2)),
            (SimTime(10.0), DepotId(0)),
            (SimTime(5.0), DepotId(1)),
        ]
        .into_iter()
        .collect();
        assert_eq!(s.next_time(), SimTime(5.0));
        assert!(s.pop_due(SimTime(4.0)).is_none());
        assert_eq!(s.pop_due(SimTime(10.0)), Some((SimTime(5.0), DepotId(1))));
        assert_eq!(s.pop_due(SimTime(10.0)), Some((SimTime(10.0), DepotId(0))));
        assert_eq!(s.pop_due(SimTime(10.0)), Some((SimTime(10.0), DepotId(2))));
        assert!(s.pop_due(SimTime(10.0)).is_none());
        assert_eq!(s.next_time(), SimTime::INFINITY);
    }

    #[test]
    fn overdue_depot_pops_once_per_period() {
        let mut s = SupplySchedule::new();
        s.push(SimTime(10.0), DepotId(0));
        let mut applied = 0;
        while let Some((t, d)) = s.pop_due(SimTime(35.0)) {
            applied += 1;
            s.push(t + 10.0, d);
        }
        assert_eq!(applied, 3);
        assert_eq!(s.next_time(), SimTime(40.0));
    }
}
