pub mod mock_safe_browsing;
