//! Testes do fork COW sobre um kernel simulado.

mod fork_test;
