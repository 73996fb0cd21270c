mod interaction;
mod layout;
mod lines;
mod view;

pub(in crate::app) use interaction::GestureInput;
pub(in crate::app) use layout::TreeLayout;
