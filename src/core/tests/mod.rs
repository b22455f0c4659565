mod worker_pair_tests;
