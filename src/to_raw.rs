//! this is for information hiding

pub trait ToRaw<T> {
    fn raw(&self) -> &T;
}
