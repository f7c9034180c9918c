//! Shared handles to declared objects.

use std::any::Any;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::object::base::{BaseObject, Construct};
use crate::object::descriptor::TypeDescriptor;
use crate::object::equality::objects_equal;

/// Upcast to [`Any`] for downcasting trait objects back to their concrete type.
///
/// Implemented for every `'static` type; call it through `&dyn BaseObject`
/// so that the call dispatches to the concrete type.
pub trait AsAny: Any {
    /// Borrows `self` as `&dyn Any`.
    fn as_any(&self) -> &dyn Any;

    /// Borrows `self` as `&mut dyn Any`.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// A shared, lockable handle to a declared object.
///
/// Cloning the handle shares the object. Setting nested parameters through a
/// handle mutates the shared object in place, so every holder observes the
/// change and identity is preserved.
///
/// [`deep_clone`](Self::deep_clone) gives an independent copy instead.
///
/// Lock poisoning is ignored: the protocol never leaves an object half
/// updated across a panic that it could observe.
#[derive(Clone)]
pub struct ObjectRef {
    inner: Arc<RwLock<dyn BaseObject>>,
    duplicate: fn(&dyn BaseObject) -> ObjectRef,
}

/// Rebuilds a `T` from the state of `source`.
///
/// Typed fields are re-established by `init`, as on `reset`; everything held
/// in the object state is copied, nested objects included.
fn duplicate<T: Construct + 'static>(source: &dyn BaseObject) -> ObjectRef {
    let state = source.state().deep_clone();
    let mut object = T::blank();
    object.init(state.params());
    *object.state_mut() = state;
    ObjectRef::new(object)
}

impl ObjectRef {
    /// Moves `object` into a new shared handle.
    #[must_use]
    pub fn new<T: Construct + 'static>(object: T) -> Self {
        let inner: Arc<RwLock<dyn BaseObject>> = Arc::new(RwLock::new(object));
        Self {
            inner,
            duplicate: duplicate::<T>,
        }
    }

    /// An independent copy of the object, recursing into nested objects.
    ///
    /// Mutating the copy never affects this handle's object, or the reverse.
    #[must_use]
    pub fn deep_clone(&self) -> Self {
        let guard = self.read();
        (self.duplicate)(&*guard)
    }

    /// Acquires shared access to the object.
    pub fn read(&self) -> RwLockReadGuard<'_, dyn BaseObject> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Acquires exclusive access to the object.
    pub fn write(&self) -> RwLockWriteGuard<'_, dyn BaseObject> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Whether both handles point at the same object.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// The object's type descriptor.
    #[must_use]
    pub fn descriptor(&self) -> &'static TypeDescriptor {
        self.read().descriptor()
    }

    /// The object's type name.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.descriptor().name
    }

    /// Text representation of the object.
    #[must_use]
    pub fn repr(&self) -> String {
        self.read().repr()
    }

    /// Whether the object's concrete type is `T`.
    #[must_use]
    pub fn is<T: BaseObject + 'static>(&self) -> bool {
        let guard = self.read();
        let object: &dyn BaseObject = &*guard;
        object.as_any().is::<T>()
    }

    /// Runs `f` on the object if its concrete type is `T`.
    pub fn with<T: BaseObject + 'static, R>(&self, f: impl FnOnce(&T) -> R) -> Option<R> {
        let guard = self.read();
        let object: &dyn BaseObject = &*guard;
        object.as_any().downcast_ref::<T>().map(f)
    }

    /// Runs `f` on the object mutably if its concrete type is `T`.
    pub fn with_mut<T: BaseObject + 'static, R>(&self, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        let mut guard = self.write();
        let object: &mut dyn BaseObject = &mut *guard;
        object.as_any_mut().downcast_mut::<T>().map(f)
    }
}

impl PartialEq for ObjectRef {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || objects_equal(&*self.read(), &*other.read())
    }
}

impl fmt::Debug for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.repr())
    }
}
