// Service exports
pub mod cache;
pub mod supabase;

pub use cache::{CacheError, CacheKey, CacheManager, CacheStats};
pub use supabase::{SupabaseClient, SupabaseError};
