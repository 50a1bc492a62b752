//! Test doubles for the simulator's injected collaborators.
