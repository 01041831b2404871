//! Unit tests laid out to mirror the library's module tree

mod io;
