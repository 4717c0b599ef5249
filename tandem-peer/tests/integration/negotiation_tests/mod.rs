mod test_glare_resolution;
