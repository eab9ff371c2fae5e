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

use common::init_test_logging;
use std::fmt::Debug;
use std::str::FromStr;
use tidal::{
    DateSpan, FloatSpanSet, GeomSet, IntSet, IntSpan, Period, PeriodSet, TBool, TFloat, TGeomPoint, TInt, TText,
    TemporalValue, Temporal, TextSet, TimestampSet, WkbByteOrder,
};

fn text_round_trip<X>(literal: &str)
where
    X: FromStr + ToString + PartialEq + Debug,
    X::Err: Debug,
{
    let x: X = literal.parse().unwrap();
    let again: X = x.to_string().parse().unwrap();
    assert_eq!(again, x, "{literal}");
}

fn temporal_round_trip<T: TemporalValue>(literal: &str) {
    text_round_trip::<Temporal<T>>(literal);
    let x: Temporal<T> = literal.parse().unwrap();
    for order in [WkbByteOrder::Ndr, WkbByteOrder::Xdr] {
        assert_eq!(Temporal::<T>::from_wkb(&x.as_wkb(order)).unwrap(), x, "{literal}");
        assert_eq!(Temporal::<T>::from_hexwkb(&x.as_hexwkb(order)).unwrap(), x, "{literal}");
    }
}

#[test]
fn test_collection_text_round_trips() {
    init_test_logging();
    text_round_trip::<IntSpan>("(7, 10)");
    text_round_trip::<DateSpan>("[2019-09-01, 2019-09-05]");
    text_round_trip::<Period>("(2019-09-01 08:00:00+02, 2019-09-05 10:30:00.25]");
    text_round_trip::<FloatSpanSet>("{[1, 2), [3.5, 5]}");
    text_round_trip::<PeriodSet>("{[2019-09-01, 2019-09-02], (2019-09-03, 2019-09-04)}");
    text_round_trip::<IntSet>("{3, 1, 2}");
    text_round_trip::<TextSet>("{\"b, c\", a}");
    text_round_trip::<TimestampSet>("{2019-09-01, 2019-09-02 12:00:00}");
    text_round_trip::<GeomSet>("{POINT(1 2), POINT(0 0)}");
}

#[test]
fn test_collection_wkb_round_trips() {
    init_test_logging();
    let span: IntSpan = "[1, 9)".parse().unwrap();
    assert_eq!(IntSpan::from_hexwkb(&span.as_hexwkb(WkbByteOrder::Xdr)).unwrap(), span);
    let spans: PeriodSet = "{[2019-09-01, 2019-09-02), [2019-09-05, 2019-09-06]}".parse().unwrap();
    assert_eq!(PeriodSet::from_wkb(&spans.as_wkb(WkbByteOrder::Ndr)).unwrap(), spans);
    let set: TextSet = "{a, \"b c\"}".parse().unwrap();
    assert_eq!(TextSet::from_wkb(&set.as_wkb(WkbByteOrder::Xdr)).unwrap(), set);
}

#[test]
fn test_int_and_bool_temporals() {
    init_test_logging();
    temporal_round_trip::<i32>("5@2019-09-01");
    temporal_round_trip::<i32>("{1@2019-09-01, 2@2019-09-02}");
    temporal_round_trip::<i32>("(1@2019-09-01, 2@2019-09-02, 2@2019-09-04)");
    temporal_round_trip::<i32>("{[1@2019-09-01, 2@2019-09-02), [5@2019-09-04]}");
    temporal_round_trip::<bool>("[t@2019-09-01, f@2019-09-02]");
    let _: TInt = "1@2019-09-01".parse().unwrap();
    let _: TBool = "t@2019-09-01".parse().unwrap();
}

#[test]
fn test_float_temporals() {
    init_test_logging();
    temporal_round_trip::<f64>("1.5@2019-09-01 12:00:00");
    temporal_round_trip::<f64>("[1@2019-09-01, 3@2019-09-02, 0@2019-09-04)");
    temporal_round_trip::<f64>("Interp=Step;[1@2019-09-01, 3@2019-09-02]");
    temporal_round_trip::<f64>("Interp=Step;{[1@2019-09-01, 3@2019-09-02], [4@2019-09-05]}");
    let x: TFloat = "Interp=Step;[1@2019-09-01, 3@2019-09-02]".parse().unwrap();
    assert!(x.to_string().starts_with("Interp=Step;"));
}

#[test]
fn test_text_and_point_temporals() {
    init_test_logging();
    temporal_round_trip::<String>("{\"a b\"@2019-09-01, c@2019-09-02}");
    temporal_round_trip::<String>("[a@2019-09-01, b@2019-09-03]");
    temporal_round_trip::<tidal::GeomPoint>("[POINT(0 0)@2019-09-01, POINT(2 2)@2019-09-03]");
    temporal_round_trip::<tidal::GeomPoint>("{[POINT(0 0)@2019-09-01], [POINT(1 1)@2019-09-02, POINT(1 2)@2019-09-03]}");
    let _: TText = "a@2019-09-01".parse().unwrap();
    let _: TGeomPoint = "POINT(1 1)@2019-09-01".parse().unwrap();
}
