pub mod window_loop;
