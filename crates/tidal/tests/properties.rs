// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

mod common;

use proptest::prelude::*;
use tidal::{
    FloatSet, FloatSpan, GeomPoint, IntSet, IntSpan, IntSpanSet, Interpolation, Period, TInstant, TSequence,
    TSequenceSet, Temporal, TemporalValue, Timestamp, WkbByteOrder,
};

const MICROS_PER_HOUR: i64 = 3_600_000_000;

fn tick(n: i64, unit: i64) -> Timestamp {
    let base = Timestamp::from_ymd(2019, 9, 1).unwrap().micros();
    Timestamp::from_micros(base + n * unit)
}

fn hour(h: i64) -> Timestamp {
    tick(h, MICROS_PER_HOUR)
}

fn int_span() -> impl Strategy<Value = IntSpan> {
    (-50i32..50, 0i32..20, any::<bool>(), any::<bool>())
        .prop_filter_map("empty span", |(lo, len, li, ui)| IntSpan::new(lo, lo + len, li, ui).ok())
}

fn int_spanset() -> impl Strategy<Value = IntSpanSet> {
    prop::collection::vec(int_span(), 1..6).prop_map(|spans| IntSpanSet::new(spans).unwrap())
}

fn int_set() -> impl Strategy<Value = IntSet> {
    prop::collection::vec(0i32..6, 1..4).prop_map(|values| IntSet::new(values).unwrap())
}

/// Instants at strictly increasing multiples of `unit` microseconds.
fn instants<T>(
    values: impl Strategy<Value = T> + Clone,
    start: i64,
    unit: i64,
) -> impl Strategy<Value = Vec<TInstant<T>>>
where
    T: TemporalValue,
{
    prop::collection::vec((values, 1i64..4), 1..6).prop_map(move |pairs| {
        let mut n = start;
        pairs
            .into_iter()
            .map(|(v, step)| {
                n += step;
                TInstant::new(v, tick(n, unit))
            })
            .collect()
    })
}

fn sequence<T>(
    values: impl Strategy<Value = T> + Clone,
    interpolation: Interpolation,
    start: i64,
    unit: i64,
) -> impl Strategy<Value = TSequence<T>>
where
    T: TemporalValue,
{
    (instants(values, start, unit), any::<bool>(), any::<bool>()).prop_map(move |(instants, li, ui)| {
        let single = instants.len() == 1;
        TSequence::new(instants, li || single, ui || single, interpolation, true).unwrap()
    })
}

/// Continuous values at hourly steps: one sequence, or two separated by a gap.
fn temporal<T>(values: impl Strategy<Value = T> + Clone + 'static, interpolation: Interpolation) -> BoxedStrategy<Temporal<T>>
where
    T: TemporalValue,
{
    temporal_every(values, interpolation, MICROS_PER_HOUR)
}

fn temporal_every<T>(
    values: impl Strategy<Value = T> + Clone + 'static,
    interpolation: Interpolation,
    unit: i64,
) -> BoxedStrategy<Temporal<T>>
where
    T: TemporalValue,
{
    let single = sequence(values.clone(), interpolation, 0, unit).prop_map(Temporal::<T>::from);
    let pair = (sequence(values.clone(), interpolation, 0, unit), sequence(values, interpolation, 30, unit))
        .prop_map(|(a, b)| Temporal::SeqSet(TSequenceSet::new(vec![a, b], true).unwrap()));
    prop_oneof![single, pair].boxed()
}

/// Linear floats whose instants lie microseconds apart, so most crossings
/// fall between representable timestamps.
fn micro_floats() -> BoxedStrategy<Temporal<f64>> {
    let values = (-8i32..8).prop_map(f64::from);
    prop_oneof![
        temporal_every(values.clone(), Interpolation::Linear, 1),
        temporal_every(values, Interpolation::Linear, 7),
    ]
    .boxed()
}

fn half(range: std::ops::Range<i32>) -> impl Strategy<Value = f64> + Clone {
    range.prop_map(|v| f64::from(v) / 2.0)
}

fn float_set() -> impl Strategy<Value = FloatSet> {
    prop::collection::vec(half(-16..16), 1..4).prop_map(|values| FloatSet::new(values).unwrap())
}

fn float_span() -> impl Strategy<Value = FloatSpan> {
    (half(-16..16), half(0..12), any::<bool>(), any::<bool>())
        .prop_filter_map("empty span", |(lo, len, li, ui)| FloatSpan::new(lo, lo + len, li, ui).ok())
}

fn point() -> impl Strategy<Value = GeomPoint> + Clone {
    (-3i32..3, -3i32..3).prop_map(|(x, y)| GeomPoint::new(f64::from(x), f64::from(y)))
}

/// Points halfway along the grid as well, so targets hit segment interiors.
fn target_point() -> impl Strategy<Value = GeomPoint> {
    (half(-6..6), half(-6..6)).prop_map(|(x, y)| GeomPoint::new(x, y))
}

fn period() -> impl Strategy<Value = Period> {
    (0i64..50, 1i64..20, any::<bool>(), any::<bool>())
        .prop_map(|(lo, len, li, ui)| Period::new(hour(lo), hour(lo + len), li, ui).unwrap())
}

fn reconstructs<T: TemporalValue>(x: &Temporal<T>, at: Option<Temporal<T>>, minus: Option<Temporal<T>>) -> bool {
    match (at, minus) {
        (Some(a), Some(m)) => a.merge(&m).is_ok_and(|merged| merged == *x),
        (Some(a), None) => a == *x,
        (None, Some(m)) => m == *x,
        (None, None) => false,
    }
}

proptest! {
    #[test]
    fn prop_union_contains_operands(a in int_spanset(), b in int_spanset()) {
        common::init_test_logging();
        let union = a.union(&b);
        prop_assert!(union.contains_spanset(&a));
        prop_assert!(union.contains_spanset(&b));
    }

    #[test]
    fn prop_intersection_is_contained(a in int_spanset(), b in int_spanset()) {
        if let Some(i) = a.intersection(&b) {
            prop_assert!(a.contains_spanset(&i));
            prop_assert!(b.contains_spanset(&i));
        }
    }

    #[test]
    fn prop_position_is_symmetric(a in int_span(), b in int_span()) {
        prop_assert_eq!(a.is_left(&b), b.is_right(&a));
        if a.is_left(&b) {
            prop_assert!(!a.overlaps(&b));
        }
    }

    #[test]
    fn prop_normalization_is_idempotent(s in int_spanset(), v in int_set(), x in temporal(0i32..4, Interpolation::Step)) {
        prop_assert_eq!(s.normalize().normalize(), s.normalize());
        prop_assert_eq!(v.normalize().normalize(), v.normalize());
        let ss = x.to_sequence_set();
        prop_assert_eq!(ss.normalize().normalize(), ss.normalize());
    }

    #[test]
    fn prop_step_restriction_to_period_is_complete(x in temporal(0i32..4, Interpolation::Step), p in period()) {
        prop_assert!(reconstructs(&x, x.at_time(&p), x.minus_time(&p)));
    }

    #[test]
    fn prop_step_restriction_to_values_is_complete(x in temporal(0i32..4, Interpolation::Step), v in int_set()) {
        prop_assert!(reconstructs(&x, x.at_values(&v), x.minus_values(&v)));
    }

    #[test]
    fn prop_step_restriction_to_span_is_complete(x in temporal(0i32..4, Interpolation::Step), s in int_span()) {
        prop_assert!(reconstructs(&x, x.at_values(&s), x.minus_values(&s)));
    }

    #[test]
    fn prop_linear_restriction_to_period_is_complete(x in temporal(-8i32..8, Interpolation::Step), p in period()) {
        let x = to_float(&x);
        prop_assert!(reconstructs(&x, x.at_time(&p), x.minus_time(&p)));
    }

    #[test]
    fn prop_linear_restriction_to_timestamp_is_complete(x in temporal(-8i32..8, Interpolation::Step), h in 0i64..50) {
        let x = to_float(&x);
        prop_assert!(reconstructs(&x, x.at_time(hour(h)), x.minus_time(hour(h))));
    }

    #[test]
    fn prop_linear_restriction_to_value_is_complete(x in micro_floats(), v in half(-16..16)) {
        let at = x.at_value(&v);
        if let Some(a) = &at {
            prop_assert!(a.values().iter().all(|w| w.approx_eq(&v)));
        }
        prop_assert!(reconstructs(&x, at, x.minus_value(&v)));
    }

    #[test]
    fn prop_linear_restriction_to_float_set_is_complete(x in micro_floats(), v in float_set()) {
        prop_assert!(reconstructs(&x, x.at_values(&v), x.minus_values(&v)));
    }

    #[test]
    fn prop_linear_restriction_to_float_span_is_complete(x in micro_floats(), s in float_span()) {
        let at = x.at_values(&s);
        if let Some(a) = &at {
            for inst in a.instants() {
                if let Ok(w) = x.value_at_timestamp(inst.timestamp()) {
                    prop_assert_eq!(w, *inst.value());
                }
            }
        }
        prop_assert!(reconstructs(&x, at, x.minus_values(&s)));
    }

    #[test]
    fn prop_point_restriction_to_value_is_complete(x in temporal_every(point(), Interpolation::Linear, 3), p in target_point()) {
        prop_assert!(reconstructs(&x, x.at_value(&p), x.minus_value(&p)));
    }

    #[test]
    fn prop_text_round_trip(x in temporal(0i32..4, Interpolation::Step)) {
        let parsed: Temporal<i32> = x.to_string().parse().unwrap();
        prop_assert_eq!(parsed, x);
    }

    #[test]
    fn prop_collection_round_trips(s in int_spanset(), v in int_set()) {
        prop_assert_eq!(s.to_string().parse::<IntSpanSet>().unwrap(), s.clone());
        prop_assert_eq!(v.to_string().parse::<IntSet>().unwrap(), v.clone());
        for order in [WkbByteOrder::Ndr, WkbByteOrder::Xdr] {
            prop_assert_eq!(IntSpanSet::from_wkb(&s.as_wkb(order)).unwrap(), s.clone());
            prop_assert_eq!(IntSet::from_wkb(&v.as_wkb(order)).unwrap(), v.clone());
        }
    }

    #[test]
    fn prop_temporal_round_trips(x in micro_floats(), y in temporal(0i32..4, Interpolation::Step)) {
        prop_assert_eq!(x.to_string().parse::<Temporal<f64>>().unwrap(), x.clone());
        for order in [WkbByteOrder::Ndr, WkbByteOrder::Xdr] {
            prop_assert_eq!(Temporal::<f64>::from_wkb(&x.as_wkb(order)).unwrap(), x.clone());
            prop_assert_eq!(Temporal::<i32>::from_wkb(&y.as_wkb(order)).unwrap(), y.clone());
        }
    }
}

/// The same shape with float values and linear interpolation.
fn to_float(x: &Temporal<i32>) -> Temporal<f64> {
    let sequences = x
        .sequences()
        .unwrap()
        .into_iter()
        .map(|s| {
            let instants = s
                .instants()
                .iter()
                .map(|i| TInstant::new(f64::from(*i.value()), i.timestamp()))
                .collect();
            TSequence::new(instants, s.lower_inc(), s.upper_inc(), Interpolation::Linear, true).unwrap()
        })
        .collect();
    Temporal::SeqSet(TSequenceSet::new(sequences, true).unwrap())
}
