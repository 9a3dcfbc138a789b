mod sign;

pub use sign::Sign;
