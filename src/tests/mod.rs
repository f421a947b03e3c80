mod check;
mod dice;
mod properties;
mod session;
