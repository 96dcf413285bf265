//! Integration tests for `FunctionRef`.
//!
//! - `test_functor_two_arguments`: `(1, 3) -> 4` through a closure, a function
//!   item, a function pointer and a user functor
//! - `test_overload_set_resolved_at_bind_time`: each view keeps the overload
//!   chosen when it was created
//! - `test_narrower_declared_arguments`: a `(i32, i16)` view over a `(i32, i32)`
//!   target
//! - `test_output_widening`: the target's output converts into the declared one
//! - `test_view_of_view`: views wrap views with compatible signatures
//! - `test_discarding_view_of_view`: a `()` view discards the wrapped output
//! - `test_member_functions`: method paths take the receiver first
//! - `test_assignment_snapshots_target`: `b = a` is unaffected by later
//!   changes to `a`
//! - `test_reference_arguments`: signatures with named reference lifetimes
//! - `test_mutable_reference_argument_writes_through`: a `&mut` parameter
//!   updates the caller's variable
//! - `test_dyn_target`: a `&dyn Fn` as the target

use std::cell::{Cell, RefCell};

use viewref::{Callable, FunctionRef};

fn add(a: i32, b: i32) -> i32 {
    a + b
}

struct Adder;

impl Callable<(i32, i32)> for Adder {
    type Output = i32;

    fn invoke(&self, (a, b): (i32, i32)) -> i32 {
        a + b
    }
}

/// Records which overload handled a call.
#[derive(Default)]
struct Tracer {
    calls: RefCell<Vec<&'static str>>,
}

impl Callable<(i32,)> for Tracer {
    type Output = i64;

    fn invoke(&self, (value,): (i32,)) -> i64 {
        self.calls.borrow_mut().push("i32");
        i64::from(value)
    }
}

impl Callable<(i64,)> for Tracer {
    type Output = i64;

    fn invoke(&self, (value,): (i64,)) -> i64 {
        self.calls.borrow_mut().push("i64");
        value * 2
    }
}

/// Increments in place through `&mut i32`, or returns the successor of an
/// `i32`.
struct Increment;

impl<'v> Callable<(&'v mut i32,)> for Increment {
    type Output = ();

    fn invoke(&self, (value,): (&'v mut i32,)) {
        *value += 1;
    }
}

impl Callable<(i32,)> for Increment {
    type Output = i32;

    fn invoke(&self, (value,): (i32,)) -> i32 {
        value + 1
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Point {
    x: i32,
    y: i32,
}

impl Point {
    fn dot(self, other: Point) -> i32 {
        self.x * other.x + self.y * other.y
    }

    fn scaled(&self, factor: i32) -> Point {
        Point {
            x: self.x * factor,
            y: self.y * factor,
        }
    }
}

#[test]
fn test_functor_two_arguments() {
    let closure = |a: i32, b: i32| a + b;
    let pointer: fn(i32, i32) -> i32 = add;

    let views: [FunctionRef<'_, fn(i32, i32) -> i32>; 4] = [
        FunctionRef::new(&closure),
        FunctionRef::new(&add),
        FunctionRef::new(&pointer),
        FunctionRef::new(&Adder),
    ];

    for view in views {
        assert_eq!(view.call(1, 3), 4);
        assert_eq!(view.call_tuple((-2, 2)), 0);
    }
}

#[test]
fn test_overload_set_resolved_at_bind_time() {
    let tracer = Tracer::default();

    let narrow: FunctionRef<'_, fn(i32) -> i64> = FunctionRef::new(&tracer);
    let wide: FunctionRef<'_, fn(i64) -> i64> = FunctionRef::new(&tracer);
    let converted: FunctionRef<'_, fn(i16) -> i64> =
        FunctionRef::adapt::<_, (i64,)>(&tracer);

    assert_eq!(narrow.call(5), 5);
    assert_eq!(wide.call(5), 10);
    assert_eq!(converted.call(5), 10);
    assert_eq!(narrow.call(6), 6);

    assert_eq!(*tracer.calls.borrow(), ["i32", "i64", "i64", "i32"]);
}

#[test]
fn test_narrower_declared_arguments() {
    let view: FunctionRef<'_, fn(i32, i16) -> i32> = FunctionRef::adapt(&add);
    assert_eq!(view.call(1, 3), 4);
    assert_eq!(view.call(i32::MAX - 1, 1), i32::MAX);
    assert_eq!(view.call(0, i16::MIN), i32::from(i16::MIN));
}

#[test]
fn test_output_widening() {
    let view: FunctionRef<'_, fn(u8, u8) -> i64> = FunctionRef::adapt(&add);
    assert_eq!(view.call(200, 100), 300);
}

#[test]
fn test_view_of_view() {
    let inner: FunctionRef<'_, fn(i32, i32) -> i32> = FunctionRef::new(&add);

    let same: FunctionRef<'_, fn(i32, i32) -> i32> = FunctionRef::new(&inner);
    let compatible: FunctionRef<'_, fn(i16, u8) -> i64> = FunctionRef::adapt(&inner);

    assert_eq!(same.call(1, 3), 4);
    assert_eq!(compatible.call(-1, 3), 2);
}

#[test]
fn test_discarding_view_of_view() {
    let total = Cell::new(0);
    let accumulate = |value: i32| {
        total.set(total.get() + value);
        total.get()
    };

    let inner: FunctionRef<'_, fn(i32) -> i32> = FunctionRef::new(&accumulate);
    let sink: FunctionRef<'_, fn(i32)> = FunctionRef::discarding(&inner);
    let narrow_sink: FunctionRef<'_, fn(i8)> = FunctionRef::discarding(&inner);

    sink.call(4);
    narrow_sink.call(-1);
    let () = sink.call(10);

    assert_eq!(total.get(), 13);
}

#[test]
fn test_member_functions() {
    let dot: FunctionRef<'_, fn(Point, Point) -> i32> = FunctionRef::new(&Point::dot);
    let a = Point { x: 1, y: 2 };
    let b = Point { x: 3, y: 4 };
    assert_eq!(dot.call(a, b), 11);

    let power: FunctionRef<'_, fn(i32, u32) -> i32> = FunctionRef::new(&i32::pow);
    assert_eq!(power.call(3, 4), 81);

    scale_all(&[a, b]);
}

fn scale_all<'p>(points: &'p [Point]) {
    let scale: FunctionRef<'_, fn(&'p Point, i32) -> Point> = FunctionRef::new(&Point::scaled);
    let scaled: Vec<Point> = points.iter().map(|point| scale.call(point, 10)).collect();
    assert_eq!(scaled, [Point { x: 10, y: 20 }, Point { x: 30, y: 40 }]);
}

#[test]
fn test_assignment_snapshots_target() {
    let double = |x: i32| x * 2;
    let square = |x: i32| x * x;

    let mut a: FunctionRef<'_, fn(i32) -> i32> = FunctionRef::new(&double);
    let mut b: FunctionRef<'_, fn(i32) -> i32> = FunctionRef::new(&square);
    assert_eq!(b.call(5), 25);

    b = a;
    assert_eq!(b.call(5), a.call(5));

    a = FunctionRef::new(&square);
    assert_eq!(a.call(5), 25);
    assert_eq!(b.call(5), 10);

    b = (&square).into();
    assert_eq!(b.call(3), 9);
}

#[test]
fn test_reference_arguments() {
    fn longest<'s>(items: &'s [String]) -> usize {
        let len: FunctionRef<'_, fn(&'s String) -> usize> = FunctionRef::new(&String::len);
        items.iter().map(|item| len.call(item)).max().unwrap_or(0)
    }

    let items = vec![String::from("a"), String::from("abc"), String::from("ab")];
    assert_eq!(longest(&items), 3);
}

#[test]
fn test_mutable_reference_argument_writes_through() {
    fn increment_in_place<'v>(var: &'v mut i32) {
        let view: FunctionRef<'_, fn(&'v mut i32)> = FunctionRef::new(&Increment);
        view.call(var);
    }

    fn add_ten<'v>(var: &'v mut i32) {
        let add = |value: &mut i32| *value += 10;
        let view: FunctionRef<'_, fn(&'v mut i32)> = FunctionRef::new(&add);
        view.call(var);
    }

    let mut var = 0;
    increment_in_place(&mut var);
    assert_eq!(var, 1);

    add_ten(&mut var);
    assert_eq!(var, 11);

    let successor: FunctionRef<'_, fn(i32) -> i32> = FunctionRef::new(&Increment);
    assert_eq!(successor.call(var), 12);
    assert_eq!(var, 11);
}

#[test]
fn test_dyn_target() {
    let offset = 7;
    let shift = move |x: i32| x + offset;
    let erased: &dyn Fn(i32) -> i32 = &shift;

    let view: FunctionRef<'_, fn(i32) -> i32> = FunctionRef::new(&erased);
    assert_eq!(view.call(1), 8);
}
