pub mod athlete;
pub mod category;
pub mod reference;
pub mod training_center;
