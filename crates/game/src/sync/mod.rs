mod reconciler;

pub use reconciler::{Reconciled, StateReconciler};
