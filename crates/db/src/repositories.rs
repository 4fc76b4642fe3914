pub mod kv_record;
