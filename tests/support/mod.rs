pub mod mock_grid;
