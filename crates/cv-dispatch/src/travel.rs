//! Leg-by-leg travel simulation with stamina and refuel stops.

use cv_core::{Point, SimTime, VertexId};
use cv_fleet::{Courier, CourierType};
use cv_spatial::RouteGraph;

use crate::events::{EventKind, EventLog};

/// Walk `legs` starting at `start` and return the arrival time.
///
/// Before each leg the courier refuels if its stamina is below the leg
/// length (one `refuel_time`, stamina back to full range); otherwise a
/// transit event is logged for every intermediate point, that is any leg
/// start other than `origin`.  Stamina carries over between calls.
pub fn traverse<I>(
    courier: &mut Courier,
    kind:    &CourierType,
    legs:    I,
    origin:  VertexId,
    start:   SimTime,
    graph:   &RouteGraph,
    log:     &mut EventLog,
) -> SimTime
where
    I: IntoIterator<Item = (Point, Point)>,
{
    let mut time = start;
    for (from, to) in legs {
        let distance = from.distance(to);
        if courier.needs_refuel(distance) {
            let resumes_at = time + kind.refuel_time;
            log.push(time, EventKind::Refuel {
                courier:    courier.id,
                place:      graph.place(from.id),
                type_name:  kind.name.clone(),
                resumes_at,
            });
            time = resumes_at;
            courier.refuel();
        } else if from.id != origin {
            log.push(time, EventKind::Transit { courier: courier.id, place: graph.place(from.id) });
        }
        courier.consume(distance);
        time += distance / courier.speed;
    }
    time
}
