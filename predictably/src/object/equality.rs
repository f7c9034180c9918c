//! Parameter-based equality of declared objects.

use crate::object::base::BaseObject;

/// Whether `a` and `b` have the same concrete type and equal deep parameters.
///
/// Derived and fitted state is ignored. Parameters compare with
/// [`Value`](crate::Value) equality, so `x=1` equals `x=1.0` but not `x=true`.
/// Objects whose parameters cannot be read compare unequal.
pub fn objects_equal<A, B>(a: &A, b: &B) -> bool
where
    A: BaseObject + ?Sized,
    B: BaseObject + ?Sized,
{
    if !std::ptr::eq(a.descriptor(), b.descriptor()) {
        return false;
    }
    match (a.get_params(true), b.get_params(true)) {
        (Ok(left), Ok(right)) => left == right,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::fixtures::{composite, Child, Inner, Parent};
    use crate::object::Construct;
    use crate::value::{ParamMap, Value};

    #[test]
    fn test_equal_params_equal_objects() {
        assert!(objects_equal(&composite(4), &composite(4)));
        assert!(!objects_equal(&composite(4), &composite(5)));
    }

    #[test]
    fn test_fitted_state_is_ignored() {
        let a = Inner::with_defaults().unwrap();
        let mut b = Inner::with_defaults().unwrap();
        b.state_mut().set_attr("coef_", Value::from(0.3));
        assert!(a.equals(&b));
    }

    #[test]
    fn test_type_must_match() {
        let parent = Parent::with_defaults().unwrap();
        let child = Child::with_defaults().unwrap();
        assert_eq!(
            parent.get_params(true).unwrap(),
            child.get_params(true).unwrap()
        );
        assert!(!objects_equal(&parent, &child));
    }

    #[test]
    fn test_trait_object_equality() {
        let a: Box<dyn BaseObject> =
            Box::new(Inner::build(ParamMap::from([("x".to_string(), Value::from(2))])).unwrap());
        let b: Box<dyn BaseObject> =
            Box::new(Inner::build(ParamMap::from([("x".to_string(), Value::from(2))])).unwrap());
        assert!(*a == *b);
    }
}
