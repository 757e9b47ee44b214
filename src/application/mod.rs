pub mod sync_routine;
