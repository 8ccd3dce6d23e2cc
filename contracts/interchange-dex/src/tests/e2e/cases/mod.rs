mod test_fuzz;
mod test_orders;
