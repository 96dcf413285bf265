//! Integration tests for the object reference types.
//!
//! - `test_bind_yields_same_address`: binding a value keeps its address
//! - `test_reference_from_reference`: references built from references compare
//!   equal to each other and to the value
//! - `test_value_equality_is_not_identity`: equal values at different
//!   addresses are different references
//! - `test_widened_reference_compares_like_original`: an `ObjectRef` obtained
//!   from an `ObjectMut` gives the same comparison results
//! - `test_hash_follows_address`: hashing agrees with address identity
//! - `test_copy_is_independent`: copies never write back to the referent
//! - `test_take_leaves_moved_from_state`: `take` moves the value out and
//!   leaves `Default::default()` behind
//! - `test_replace_supplies_moved_from_state`: `replace` leaves the given value
//! - `test_with_forwards_return_value`: `with` touches the live object
//! - `test_deref_sugar`: field access goes through to the referent

use std::collections::HashSet;

use viewref::{MoveRef, ObjectMut, ObjectRef, copy, take, with};

#[derive(Debug, Clone, PartialEq, Default)]
struct Account {
    owner: String,
    balance: i64,
}

#[test]
fn test_bind_yields_same_address() {
    let number = 17u64;
    let text = String::from("live");
    let slice: &[u8] = &[1, 2, 3];

    assert!(std::ptr::eq(ObjectRef::new(&number).get(), &number));
    assert!(std::ptr::eq(ObjectRef::new(&text).get(), &text));
    assert!(std::ptr::eq(ObjectRef::new(slice).get(), slice));

    let mut mutable = 5i8;
    let expected: *const i8 = &mutable;
    assert_eq!(ObjectMut::new(&mut mutable).as_ptr(), expected);
}

#[test]
fn test_reference_from_reference() {
    let value = Account {
        owner: String::from("ferris"),
        balance: 10,
    };
    let a = ObjectRef::new(&value);
    let b = a;
    let c = ObjectRef::from(&value);

    assert_eq!(a, b);
    assert_eq!(b, a);
    assert_eq!(a, c);
    assert_eq!(a, &value);
    assert_eq!(b, &value);
    assert!(value == *a);
}

#[test]
fn test_value_equality_is_not_identity() {
    let first = Account::default();
    let second = Account::default();

    let a = ObjectRef::new(&first);
    let b = ObjectRef::new(&second);

    assert_ne!(a, b);
    assert_eq!(a, &second);
    assert_eq!(b, &first);
}

#[test]
fn test_widened_reference_compares_like_original() {
    let mut value = 3;
    let other = 3;
    let other_ref = ObjectRef::new(&other);

    let original = ObjectMut::new(&mut value);
    let widened = original.as_ref();

    assert_eq!(widened == original, original == original.as_ref());
    assert_eq!(widened == other_ref, original == other_ref);
    assert_eq!(widened == &other, original == &other);
    assert_eq!(other_ref == widened, other_ref == original);
}

#[test]
fn test_hash_follows_address() {
    let a = 1;
    let b = 1;

    let mut seen = HashSet::new();
    assert!(seen.insert(ObjectRef::new(&a)));
    assert!(!seen.insert(ObjectRef::new(&a)));
    assert!(seen.insert(ObjectRef::new(&b)));
    assert_eq!(seen.len(), 2);
}

#[test]
fn test_copy_is_independent() {
    let account = Account {
        owner: String::from("ada"),
        balance: 100,
    };

    let mut duplicate = copy(ObjectRef::new(&account));
    duplicate.balance -= 40;
    duplicate.owner.push_str(" (copy)");

    assert_eq!(account.balance, 100);
    assert_eq!(account.owner, "ada");
    assert_eq!(duplicate.balance, 60);
}

#[test]
fn test_take_leaves_moved_from_state() {
    let mut account = Account {
        owner: String::from("grace"),
        balance: 7,
    };
    let before = account.clone();

    let moved = take(MoveRef::new(&mut account));

    assert_eq!(moved, before);
    assert_eq!(account, Account::default());
}

#[test]
fn test_replace_supplies_moved_from_state() {
    let mut slot = vec![1, 2, 3];
    let moved = MoveRef::new(&mut slot).replace(vec![0]);
    assert_eq!(moved, [1, 2, 3]);
    assert_eq!(slot, [0]);
}

#[test]
fn test_with_forwards_return_value() {
    let mut account = Account::default();
    let mut reference = ObjectMut::new(&mut account);

    let new_balance = with(&mut reference, 25, |account, deposit| {
        account.balance += deposit;
        account.balance
    });
    assert_eq!(new_balance, 25);

    let owner_len = with(reference.as_ref(), (), |account, ()| account.owner.len());
    assert_eq!(owner_len, 0);

    with(reference, "new owner", |account, owner| {
        account.owner = owner.to_string();
    });
    assert_eq!(account.owner, "new owner");
    assert_eq!(account.balance, 25);
}

#[test]
fn test_deref_sugar() {
    let mut account = Account::default();
    {
        let mut reference = ObjectMut::new(&mut account);
        reference.owner.push_str("linus");
        reference.balance = 1;
    }
    let reference = ObjectRef::new(&account);
    assert_eq!(reference.owner, "linus");
    assert_eq!(reference.balance, 1);
}
