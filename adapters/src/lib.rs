pub mod griddy;
