pub mod backends;
pub mod functions;
pub mod supabase;
