pub mod signature;

use crate::{ComponentMap, Entity};
pub use signature::{Signature, MAX_COMPONENTS};

/// Any type that can be stored as a component.
pub trait Component: 'static {}

impl<T> Component for T where T: 'static {}

/// A closed set of component types, fixed at compile time.
///
/// Implemented by `#[derive(ComponentSet)]` on a struct with one
/// [`ComponentMap`] field per component type. The struct itself is the storage:
/// an [`EntityManager`](crate::EntityManager) owns exactly one instance of it.
pub trait ComponentSet: Default + Sized + 'static {
    /// The number of component types in the set.
    const COUNT: usize;
    /// Component type names in declaration order.
    const NAMES: &'static [&'static str];

    /// Removes every component value of `entity` from every map.
    fn purge(&mut self, entity: Entity);
}

/// A component type that belongs to the set `S`.
pub trait Member<S: ComponentSet>: Component + Sized {
    /// The bit position of the component in a [`Signature<S>`].
    /// Equal to the position of the field in the set declaration.
    const INDEX: usize;

    fn storage(set: &S) -> &ComponentMap<Self>;

    fn storage_mut(set: &mut S) -> &mut ComponentMap<Self>;
}

/// A filter over component types of the set `S`.
///
/// Implemented for `()` (matches everything), for every member type of `S`
/// and for tuples of member types.
pub trait ComponentQuery<S: ComponentSet> {
    /// Returns the signature with exactly the queried bits set.
    fn signature() -> Signature<S>;
}

/// Returns the bit position of the component `C` in the set `S`.
pub const fn index<S: ComponentSet, C: Member<S>>() -> usize {
    C::INDEX
}

impl<S: ComponentSet> ComponentQuery<S> for () {
    fn signature() -> Signature<S> {
        Signature::empty()
    }
}

macro_rules! impl_tuple_query {
    ($($comp_ty: ident),+) => {
        impl<S: ComponentSet, $($comp_ty: Member<S>),+> ComponentQuery<S> for ($($comp_ty,)+) {
            fn signature() -> Signature<S> {
                let mut signature = Signature::empty();
                $(signature.set::<$comp_ty>(true);)+
                signature
            }
        }
    };
}

impl_tuple_query!(A);
impl_tuple_query!(A, B);
impl_tuple_query!(A, B, C);
impl_tuple_query!(A, B, C, D);
impl_tuple_query!(A, B, C, D, E);
impl_tuple_query!(A, B, C, D, E, F);
impl_tuple_query!(A, B, C, D, E, F, G);
impl_tuple_query!(A, B, C, D, E, F, G, H);
impl_tuple_query!(A, B, C, D, E, F, G, H, I);
impl_tuple_query!(A, B, C, D, E, F, G, H, I, J);
impl_tuple_query!(A, B, C, D, E, F, G, H, I, J, K);
impl_tuple_query!(A, B, C, D, E, F, G, H, I, J, K, L);
