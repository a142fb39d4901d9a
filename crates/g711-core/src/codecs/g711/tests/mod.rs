//! G.711 engine tests

mod decoder_tests;
