mod tests_seeds;
