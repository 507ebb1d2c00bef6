use std::any::{Any, type_name};

/// A value stored in [`crate::StateCtx`] and mutated directly by the UI.
///
/// `snapshot` decides whether the value is visible to commands through
/// [`crate::CommandSnapshot`]. Values that are never read by a command can
/// keep the default `None`.
pub trait State: Any + Send {
    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    fn snapshot(&self) -> Option<Box<dyn Any + Send>> {
        None
    }

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
        log::warn!(
            "{} does not accept boxed assignment; update dropped",
            type_name::<Self>()
        );
        drop(new_self);
    }
}

/// A cache written only through an [`crate::Updater`].
///
/// Commands publish results into computes; the UI reads them with
/// [`crate::StateCtx::cached`] after [`crate::StateCtx::sync_computes`].
pub trait Compute: State {}

/// Replaces `this` with the boxed value when the types match.
pub fn state_assign_impl<T: State>(this: &mut T, new_self: Box<dyn Any + Send>) {
    match new_self.downcast::<T>() {
        Ok(value) => *this = *value,
        Err(_) => log::warn!("type mismatch while assigning {}", type_name::<T>()),
    }
}

/// Implements [`State`] for a `Clone` type whose snapshot is a plain clone.
#[macro_export]
macro_rules! snapshot_state {
    ($ty:ty) => {
        impl $crate::State for $ty {
            fn as_any(&self) -> &dyn ::std::any::Any {
                self
            }

            fn as_any_mut(&mut self) -> &mut dyn ::std::any::Any {
                self
            }

            fn snapshot(&self) -> Option<Box<dyn ::std::any::Any + Send>> {
                Some(Box::new(self.clone()))
            }

            fn assign_box(&mut self, new_self: Box<dyn ::std::any::Any + Send>) {
                $crate::state_assign_impl(self, new_self);
            }
        }
    };
}
