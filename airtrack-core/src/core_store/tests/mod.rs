/*
    Integration tests for core_store subsystem

    Test suite covering:
    - Store scenarios across add/update/delete/toggle
    - Snapshot persistence on the file backend
    - Properties of store mutators and list queries
*/

pub mod property_tests;
