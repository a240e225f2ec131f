pub mod ikdc;
pub mod iks;
pub mod koos;
pub mod lysholm;
pub mod womac;
