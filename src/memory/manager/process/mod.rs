/*!
 * Process Operations
 * Creation, tracking start and exit of simulated processes
 */

mod process_ops;
