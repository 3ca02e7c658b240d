mod bounded_buffer;
