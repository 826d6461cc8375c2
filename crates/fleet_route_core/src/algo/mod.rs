pub(crate) mod nearest_neighbor;
